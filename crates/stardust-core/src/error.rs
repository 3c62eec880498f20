//! Error types for Stardust

use thiserror::Error;

/// The main error type for Stardust operations.
///
/// The per-frame simulation never produces one of these; only configuration
/// loading, validation and system lifecycle hooks do.
#[derive(Debug, Error)]
pub enum StardustError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("TOML serialization error: {0}")]
    TomlSer(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

/// Result type alias for Stardust operations
pub type Result<T> = std::result::Result<T, StardustError>;

impl From<toml::de::Error> for StardustError {
    fn from(err: toml::de::Error) -> Self {
        StardustError::TomlParse(err.to_string())
    }
}

impl From<toml::ser::Error> for StardustError {
    fn from(err: toml::ser::Error) -> Self {
        StardustError::TomlSer(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message_names_field() {
        let err = StardustError::ValueOutOfRange {
            field: "ripples.click_speed".into(),
            min: 0.0,
            max: 100.0,
            value: -1.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("ripples.click_speed"));
        assert!(msg.contains("-1"));
    }

    #[test]
    fn toml_error_converts() {
        let bad: std::result::Result<toml::value::Table, _> = toml::from_str("seed = [");
        let err: StardustError = bad.unwrap_err().into();
        assert!(matches!(err, StardustError::TomlParse(_)));
    }
}
