//! Configuration errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("config references unset environment variable {0}")]
    EnvVarNotSet(String),

    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("config is not valid TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
}
