//! # XLCLog Core Library
//!
//! Core functionality for reading XLC2/XLC4 thermocouple loggers.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - `$TLOGA` / `$TLOGB` frame parsing with bounded field storage
//! - Typed records and their text rendering
//! - Async line sources over serial ports, files and stdin
//! - A simulated logger for running without hardware
//!
//! ## Example
//!
//! ```rust
//! use xlclog_core::frame::parse_line;
//!
//! let record = parse_line("$TLOGA,123.45,C,98.76,C\r\n").unwrap();
//! assert_eq!(record.channel_count(), 2);
//! assert_eq!(record.to_string(), "TLOGA\t0->123.4500C\t1->98.7600C\t");
//! ```

pub mod config;
pub mod demo;
pub mod frame;
pub mod record;
mod render;
pub mod source;
pub mod unit_conversion;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{ConfigError, XlcConfig};
    pub use crate::demo::DemoDevice;
    pub use crate::frame::{parse_line, FrameError, NumericPolicy, Parser, ParserConfig};
    pub use crate::record::{Record, TlogAChannel, TlogBChannel, Variant, MAX_CHANNELS};
    pub use crate::source::{FrameReader, ReadStats, SerialConfig, SourceError};
    pub use crate::unit_conversion::TemperatureUnit;
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
