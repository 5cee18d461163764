use thiserror::Error;

#[derive(Error, Debug)]
pub enum CastError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("No cast declared for attribute '{0}'")]
    UndeclaredCast(String),
    #[error("Codec for '{0}' is already registered")]
    DuplicateCodec(String),
    #[error("'{0}' is a built-in cast kind and cannot name a custom type")]
    ReservedName(String),
    #[error("Could not serialize '{type_name}': {message}")]
    Serialize { type_name: String, message: String },
    #[error("Could not deserialize '{type_name}': {message}")]
    Deserialize { type_name: String, message: String },
    #[error("Date/time error: {0}")]
    DateTime(String),
    #[error("JSON error: {0}")]
    Json(String),
    #[error("Attribute '{field}' expects {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
    },
    #[error("Attribute '{field}' cannot be stored: {message}")]
    Unstorable { field: String, message: String },
}

pub type Result<T> = std::result::Result<T, CastError>;

// Helper conversions
impl From<rusqlite::Error> for CastError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Persistence(e.to_string())
    }
}
impl From<config::ConfigError> for CastError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}
