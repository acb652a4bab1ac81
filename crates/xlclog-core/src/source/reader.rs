//! Frame read loop
//!
//! Pulls lines off an async byte stream and parses each one. A bad line never
//! ends the loop; only stream errors and end of stream do.

use futures::StreamExt;
use serde::Serialize;
use std::fmt;
use tokio::io::AsyncRead;
use tokio_util::codec::FramedRead;

use super::{LineCodec, SourceError};
use crate::frame::{FrameError, Parser};
use crate::record::Record;

/// Counters kept by a [`FrameReader`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReadStats {
    /// Lines received
    pub lines: u64,
    /// Lines decoded into records
    pub records: u64,
    /// Command/response lines skipped
    pub unsupported: u64,
    /// Data lines rejected as malformed
    pub rejected: u64,
}

impl ReadStats {
    /// Count one line with its parse outcome
    pub fn count(&mut self, result: &Result<Record, FrameError>) {
        self.lines += 1;
        match result {
            Ok(_) => self.records += 1,
            Err(e) if e.is_unsupported() => self.unsupported += 1,
            Err(_) => self.rejected += 1,
        }
    }
}

impl fmt::Display for ReadStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines: {} records, {} command/response, {} rejected",
            self.lines, self.records, self.unsupported, self.rejected
        )
    }
}

/// One received line and its parse outcome
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    /// Raw line, terminator included
    pub line: String,
    /// Parse result
    pub result: Result<Record, FrameError>,
}

/// Reads and parses frames from any async byte stream: a serial port, a
/// captured file or stdin.
pub struct FrameReader<R> {
    lines: FramedRead<R, LineCodec>,
    parser: Parser,
    stats: ReadStats,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    /// Wrap `reader`; lines are bounded by the parser's `max_line_len`
    pub fn new(reader: R, parser: Parser) -> Self {
        let codec = LineCodec::new(parser.config().max_line_len);
        Self {
            lines: FramedRead::new(reader, codec),
            parser,
            stats: ReadStats::default(),
        }
    }

    /// Counters so far
    pub fn stats(&self) -> ReadStats {
        self.stats
    }

    /// Read the next line and parse it.
    ///
    /// Returns `Ok(None)` at end of stream. Waits while the device is silent.
    pub async fn next_frame(&mut self) -> Result<Option<ParsedLine>, SourceError> {
        let Some(line) = self.lines.next().await.transpose()? else {
            return Ok(None);
        };

        tracing::trace!(line = %line.escape_debug(), "Received line");

        let result = self.parser.parse_line(&line);
        self.stats.count(&result);

        Ok(Some(ParsedLine { line, result }))
    }

    /// Read until the next line that decodes into a record.
    ///
    /// Command/response lines are logged at debug level, malformed data lines
    /// at warn level; both are skipped.
    pub async fn next_record(&mut self) -> Result<Option<Record>, SourceError> {
        while let Some(parsed) = self.next_frame().await? {
            match parsed.result {
                Ok(record) => return Ok(Some(record)),
                Err(e) if e.is_unsupported() => {
                    tracing::debug!("Skipping command/response line: {e}");
                }
                Err(e) => {
                    tracing::warn!(line = %parsed.line.escape_debug(), "Rejected frame: {e}");
                }
            }
        }

        tracing::debug!(stats = ?self.stats, "End of stream");
        Ok(None)
    }
}
