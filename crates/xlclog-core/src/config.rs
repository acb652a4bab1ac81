//! Configuration file
//!
//! A JSON document combining parser limits and serial settings. Every key is
//! optional:
//!
//! ```json
//! {
//!   "parser": { "numeric": "zero_fill", "tlogb": { "max_fields": 16, "max_field_len": 12 } },
//!   "serial": { "baud_rate": 19200 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::frame::ParserConfig;
use crate::source::SerialConfig;

/// Errors that can occur while loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid configuration syntax: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidValue(String),
}

/// Complete logger configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XlcConfig {
    /// Frame parser settings
    #[serde(default)]
    pub parser: ParserConfig,

    /// Serial line settings
    #[serde(default)]
    pub serial: SerialConfig,
}

impl XlcConfig {
    /// Load and validate a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse and validate a JSON configuration document
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: XlcConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the logger cannot operate with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parser.check().map_err(ConfigError::InvalidValue)?;
        if self.serial.baud_rate == 0 {
            return Err(ConfigError::InvalidValue(
                "baud_rate must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::NumericPolicy;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(XlcConfig::from_json("{}").unwrap(), XlcConfig::default());
    }

    #[test]
    fn test_nested_overrides() {
        let config = XlcConfig::from_json(
            r#"{ "parser": { "numeric": "zero_fill" }, "serial": { "baud_rate": 19200 } }"#,
        )
        .unwrap();
        assert_eq!(config.parser.numeric, NumericPolicy::ZeroFill);
        assert_eq!(config.serial.baud_rate, 19200);
    }

    #[test]
    fn test_invalid_values() {
        let err = XlcConfig::from_json(r#"{ "serial": { "baud_rate": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));

        let err = XlcConfig::from_json(r#"{ "parser": { "max_line_len": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));

        let err = XlcConfig::from_json("{ parser").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
