//! Line source errors

use thiserror::Error;

/// Errors raised by the device connection or the underlying stream.
///
/// Unlike [`FrameError`](crate::frame::FrameError), these end a read loop.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Serial port error: {0}")]
    SerialError(String),

    #[error("Port not found: {0}")]
    PortNotFound(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
