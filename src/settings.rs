// config lets you read a separate config file
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::convert::DEFAULT_DATE_FORMAT;
use crate::error::Result;

/// Runtime settings, read from an optional `attrcast.toml` (or any format the
/// `config` crate understands under that name) and `ATTRCAST_*` variables.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    /// strftime pattern used when date attributes are stored as text
    pub date_format: String,
    pub log_level: String,
    /// SQLite file, or `:memory:`
    pub database: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            log_level: String::from("info"),
            database: String::from(":memory:"),
        }
    }
}

impl Settings {
    pub fn load(name: &str) -> Result<Settings> {
        let defaults = Settings::default();
        let settings = Config::builder()
            .set_default("date_format", defaults.date_format)?
            .set_default("log_level", defaults.log_level)?
            .set_default("database", defaults.database)?
            .add_source(File::with_name(name).required(false))
            .add_source(Environment::with_prefix("ATTRCAST"))
            .build()?;
        Ok(settings.try_deserialize::<Settings>()?)
    }
}
