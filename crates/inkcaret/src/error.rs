//! Error types for inkcaret

use thiserror::Error;

/// Errors raised while building or loading a caret configuration
///
/// The simulator itself never fails; only configuration can.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A tuning value is out of range
    #[error("Invalid value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    /// The TOML source could not be parsed
    #[error("Failed to parse caret config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be written as TOML
    #[error("Failed to serialize caret config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type for inkcaret configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
