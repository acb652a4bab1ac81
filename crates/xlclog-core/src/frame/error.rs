//! Frame parsing errors

use thiserror::Error;

use crate::record::Variant;

/// Errors that can occur while parsing a single telemetry line.
///
/// Every variant describes one rejected line; none of them is fatal to a
/// read loop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("Unterminated frame: no CR/LF within {max} bytes")]
    UnterminatedFrame { max: usize },

    #[error("Unsupported frame '{tag}'")]
    UnsupportedFrame { tag: String },

    #[error("Field {index} exceeds {max} characters")]
    FieldTooLong { index: usize, max: usize },

    #[error("Too many fields: at most {max} allowed")]
    TooManyFields { max: usize },

    #[error("Malformed {variant} layout: {fields} fields is not a multiple of {width}")]
    MalformedLayout {
        variant: Variant,
        fields: usize,
        width: usize,
    },

    #[error("Field {index} is not a valid number: '{text}'")]
    NumericParseError { index: usize, text: String },

    #[error("Field {index} is not a temperature unit: '{text}'")]
    InvalidUnit { index: usize, text: String },

    #[error("{variant} frame carries {groups} channel groups, at most {max} supported")]
    TooManyChannels {
        variant: Variant,
        groups: usize,
        max: usize,
    },
}

impl FrameError {
    /// True for command/response traffic, which is expected on the wire and
    /// should not be reported as a fault.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, FrameError::UnsupportedFrame { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = FrameError::MalformedLayout {
            variant: Variant::TlogA,
            fields: 3,
            width: 2,
        };
        assert_eq!(
            err.to_string(),
            "Malformed TLOGA layout: 3 fields is not a multiple of 2"
        );

        let err = FrameError::UnsupportedFrame {
            tag: "$STATUS".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported frame '$STATUS'");
    }

    #[test]
    fn test_is_unsupported() {
        assert!(FrameError::UnsupportedFrame { tag: String::new() }.is_unsupported());
        assert!(!FrameError::TooManyFields { max: 16 }.is_unsupported());
    }
}
