//! XLCn Frame Parsing
//!
//! XLC2/XLC4 loggers stream one ASCII frame per line:
//!
//! ```text
//! $TLOGA,<hot_0>,<unit_0>[,<hot_1>,<unit_1>...]\r\n
//! $TLOGB,<cold_0>,<hot_0>,<status_0>,<unit_0>[,...]\r\n
//! ```
//!
//! Any other tag is command/response traffic of the device's control
//! protocol, which is reported as [`FrameError::UnsupportedFrame`].
//!
//! Parsing is pure and allocation-bounded: a [`Parser`] can be shared across
//! threads freely.

mod config;
mod decoder;
mod error;
mod tokenizer;

pub use config::{LayoutLimits, NumericPolicy, ParserConfig};
pub use decoder::decode;
pub use error::FrameError;
pub use tokenizer::{tokenize, Frame};

use crate::record::Record;

/// Maximum frame length, terminator included, emitted by the device
pub const MAX_LINE_LENGTH: usize = 128;

/// Frame parser bound to a configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a parser with the given configuration
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse one terminated line into a record
    pub fn parse_line(&self, line: &str) -> Result<Record, FrameError> {
        let frame = tokenize(line, &self.config)?;
        decode(&frame, &self.config)
    }
}

/// Parse one terminated line using the protocol defaults
pub fn parse_line(line: &str) -> Result<Record, FrameError> {
    let frame = tokenize(line, &ParserConfig::DEFAULT)?;
    decode(&frame, &ParserConfig::DEFAULT)
}
