//! Parser limits and numeric policy

use serde::{Deserialize, Serialize};

use super::MAX_LINE_LENGTH;
use crate::record::Variant;

/// Storage bounds applied to the payload of one frame variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutLimits {
    /// Maximum number of payload fields after the tag
    pub max_fields: usize,
    /// Maximum number of characters in a single field
    pub max_field_len: usize,
}

impl LayoutLimits {
    /// `$TLOGA`: four `(temperature, unit)` pairs
    pub const TLOGA: Self = Self {
        max_fields: 8,
        max_field_len: 8,
    };

    /// `$TLOGB`: four `(cold, hot, status, unit)` groups; temperatures may be
    /// printed as wide as `-XXXX.yyyy`
    pub const TLOGB: Self = Self {
        max_fields: 16,
        max_field_len: 12,
    };
}

/// How non-numeric temperature and status fields are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericPolicy {
    /// Reject the frame with `FrameError::NumericParseError`
    #[default]
    Strict,
    /// Read the longest numeric prefix of the field, or `0.0` / `0` when
    /// there is none, as the XLCn reference tools do with `atof`/`atoi`.
    /// Status values wrap into a byte.
    ZeroFill,
}

/// Parser configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// A frame must be terminated within this many bytes
    #[serde(default = "default_max_line_len")]
    pub max_line_len: usize,

    /// Limits for `$TLOGA` frames
    #[serde(default = "default_tloga_limits")]
    pub tloga: LayoutLimits,

    /// Limits for `$TLOGB` frames
    #[serde(default = "default_tlogb_limits")]
    pub tlogb: LayoutLimits,

    /// Numeric field handling
    #[serde(default)]
    pub numeric: NumericPolicy,
}

fn default_max_line_len() -> usize {
    MAX_LINE_LENGTH
}

fn default_tloga_limits() -> LayoutLimits {
    LayoutLimits::TLOGA
}

fn default_tlogb_limits() -> LayoutLimits {
    LayoutLimits::TLOGB
}

impl ParserConfig {
    /// Protocol defaults of the XLC2/XLC4 loggers
    pub const DEFAULT: Self = Self {
        max_line_len: MAX_LINE_LENGTH,
        tloga: LayoutLimits::TLOGA,
        tlogb: LayoutLimits::TLOGB,
        numeric: NumericPolicy::Strict,
    };

    /// Limits that apply to frames of `variant`
    pub fn limits(&self, variant: Variant) -> LayoutLimits {
        match variant {
            Variant::TlogA => self.tloga,
            Variant::TlogB => self.tlogb,
        }
    }

    /// Check that every limit can hold at least one complete frame.
    ///
    /// Returns a description of the first offending setting.
    pub fn check(&self) -> Result<(), String> {
        if self.max_line_len == 0 {
            return Err("max_line_len must be greater than 0".to_string());
        }

        for variant in [Variant::TlogA, Variant::TlogB] {
            let limits = self.limits(variant);
            if limits.max_fields < variant.group_width() {
                return Err(format!(
                    "{} max_fields must hold at least one group of {} fields",
                    variant,
                    variant.group_width()
                ));
            }
            if limits.max_field_len == 0 {
                return Err(format!("{} max_field_len must be greater than 0", variant));
            }
        }

        Ok(())
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
