// used to print out readable forms of a cast kind
use std::fmt;
// used when parsing a cast descriptor
use std::str::FromStr;

/// The declared target type of a model attribute.
///
/// Built-in kinds form a closed set. Anything else names an application type
/// whose codec has to be found in a [`crate::registry::CastRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CastKind {
    Integer,
    Float,
    String,
    Boolean,
    Object,
    Json,
    Collection,
    Date,
    DateTime,
    Timestamp,
    Custom(String),
}

impl CastKind {
    /// Every descriptor that resolves to a built-in kind, aliases included.
    pub const BUILT_IN: [&'static str; 15] = [
        "int",
        "integer",
        "real",
        "float",
        "double",
        "string",
        "bool",
        "boolean",
        "object",
        "array",
        "json",
        "collection",
        "date",
        "datetime",
        "timestamp",
    ];

    pub fn parse(descriptor: &str) -> CastKind {
        match descriptor {
            "int" | "integer" => CastKind::Integer,
            "real" | "float" | "double" => CastKind::Float,
            "string" => CastKind::String,
            "bool" | "boolean" => CastKind::Boolean,
            "object" => CastKind::Object,
            "array" | "json" => CastKind::Json,
            "collection" => CastKind::Collection,
            "date" => CastKind::Date,
            "datetime" => CastKind::DateTime,
            "timestamp" => CastKind::Timestamp,
            other => CastKind::Custom(other.to_string()),
        }
    }
    pub fn is_custom(&self) -> bool {
        matches!(self, CastKind::Custom(_))
    }
    pub fn custom_name(&self) -> Option<&str> {
        match self {
            CastKind::Custom(name) => Some(name),
            _ => None,
        }
    }
    pub fn is_date(&self) -> bool {
        matches!(self, CastKind::Date | CastKind::DateTime)
    }
    pub fn is_json(&self) -> bool {
        matches!(
            self,
            CastKind::Object | CastKind::Json | CastKind::Collection
        )
    }
    pub fn name(&self) -> &str {
        match self {
            CastKind::Integer => "integer",
            CastKind::Float => "float",
            CastKind::String => "string",
            CastKind::Boolean => "boolean",
            CastKind::Object => "object",
            CastKind::Json => "array",
            CastKind::Collection => "collection",
            CastKind::Date => "date",
            CastKind::DateTime => "datetime",
            CastKind::Timestamp => "timestamp",
            CastKind::Custom(name) => name,
        }
    }
}

impl FromStr for CastKind {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CastKind::parse(s))
    }
}
impl From<&str> for CastKind {
    fn from(s: &str) -> Self {
        CastKind::parse(s)
    }
}
impl fmt::Display for CastKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
