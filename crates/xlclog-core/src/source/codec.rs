//! Line framing for the device byte stream

use std::io;
use tokio_util::bytes::{Buf, BytesMut};
use tokio_util::codec::Decoder;

fn is_terminator(b: u8) -> bool {
    b == b'\r' || b == b'\n'
}

/// Splits a byte stream into terminator-inclusive lines.
///
/// - `\r`, `\n` and `\r\n` each end a line; `\r\n` split across two reads
///   still counts as a single terminator.
/// - A run of `max_length` bytes without a terminator is emitted as is (the
///   parser rejects it as unterminated) and the rest of that run is dropped
///   up to the next terminator.
/// - Bytes left at end of stream are emitted as a final, unterminated line.
/// - Non-ASCII bytes are replaced by `?`.
#[derive(Debug, Clone)]
pub struct LineCodec {
    max_length: usize,
    discarding: bool,
    after_cr: bool,
}

impl LineCodec {
    /// Create a codec emitting lines of at most `max_length` bytes
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length: max_length.max(1),
            discarding: false,
            after_cr: false,
        }
    }

    /// Longest line this codec emits
    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

/// Non-ASCII bytes become `?` one for one, so the line keeps the byte length
/// the parser's terminator bound was checked against.
fn into_line(bytes: BytesMut) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii() { char::from(b) } else { '?' })
        .collect()
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = io::Error;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<String>, io::Error> {
        loop {
            if self.after_cr {
                if buf.is_empty() {
                    return Ok(None);
                }
                if buf[0] == b'\n' {
                    buf.advance(1);
                }
                self.after_cr = false;
            }

            if self.discarding {
                match buf.iter().position(|&b| is_terminator(b)) {
                    Some(pos) => {
                        self.after_cr = buf[pos] == b'\r';
                        buf.advance(pos + 1);
                        self.discarding = false;
                        continue;
                    }
                    None => {
                        buf.clear();
                        return Ok(None);
                    }
                }
            }

            let scan = buf.len().min(self.max_length);
            return match buf[..scan].iter().position(|&b| is_terminator(b)) {
                Some(pos) => {
                    let mut end = pos + 1;
                    if buf[pos] == b'\r' {
                        if end < buf.len() {
                            if buf[end] == b'\n' {
                                end += 1;
                            }
                        } else {
                            self.after_cr = true;
                        }
                    }
                    Ok(Some(into_line(buf.split_to(end))))
                }
                None if buf.len() >= self.max_length => {
                    self.discarding = true;
                    Ok(Some(into_line(buf.split_to(self.max_length))))
                }
                None => Ok(None),
            };
        }
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<String>, io::Error> {
        if let Some(line) = self.decode(buf)? {
            return Ok(Some(line));
        }

        self.after_cr = false;
        self.discarding = false;
        if buf.is_empty() {
            Ok(None)
        } else {
            let len = buf.len();
            Ok(Some(into_line(buf.split_to(len))))
        }
    }
}
