//! Line Sources
//!
//! Delivers terminator-delimited lines from a logger to the frame parser.
//! Any `tokio` byte stream works; [`open_serial`] opens the device itself.

mod codec;
mod error;
mod reader;
pub mod serial;

pub use codec::LineCodec;
pub use error::SourceError;
pub use reader::{FrameReader, ParsedLine, ReadStats};
pub use serial::{list_ports, open_serial, PortInfo, SerialConfig, DEFAULT_BAUD_RATE};
