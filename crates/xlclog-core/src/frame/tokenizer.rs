//! Frame tokenizer
//!
//! Splits a CR/LF terminated line into its tag and payload fields. Fields are
//! borrowed from the input; the field list never grows past the limits of the
//! frame's variant.

use super::{FrameError, LayoutLimits, ParserConfig};
use crate::record::Variant;

/// A terminated line split into tag and payload fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Variant named by the tag field
    pub variant: Variant,
    /// Payload fields following the tag, in wire order
    pub fields: Vec<&'a str>,
}

fn is_terminator(b: u8) -> bool {
    b == b'\r' || b == b'\n'
}

/// Tokenize one line.
///
/// The line must contain `\r` or `\n` within `config.max_line_len` bytes;
/// anything after the first terminator is ignored.
pub fn tokenize<'a>(line: &'a str, config: &ParserConfig) -> Result<Frame<'a>, FrameError> {
    let end = line
        .bytes()
        .take(config.max_line_len)
        .position(is_terminator)
        .ok_or(FrameError::UnterminatedFrame {
            max: config.max_line_len,
        })?;
    let body = &line[..end];

    let (tag, payload) = match body.split_once(',') {
        Some((tag, rest)) => (tag, Some(rest)),
        None => (body, None),
    };

    let variant = Variant::from_tag(tag).ok_or_else(|| FrameError::UnsupportedFrame {
        tag: tag.to_string(),
    })?;

    let limits = config.limits(variant);
    let mut fields = Vec::with_capacity(limits.max_fields);

    if let Some(payload) = payload {
        let mut start = 0;
        for (i, b) in payload.bytes().enumerate() {
            if b == b',' {
                push_field(&mut fields, &payload[start..i], &limits)?;
                start = i + 1;
            } else if i - start >= limits.max_field_len {
                return Err(FrameError::FieldTooLong {
                    index: fields.len(),
                    max: limits.max_field_len,
                });
            }
        }
        push_field(&mut fields, &payload[start..], &limits)?;
    }

    Ok(Frame { variant, fields })
}

fn push_field<'a>(
    fields: &mut Vec<&'a str>,
    field: &'a str,
    limits: &LayoutLimits,
) -> Result<(), FrameError> {
    if fields.len() >= limits.max_fields {
        return Err(FrameError::TooManyFields {
            max: limits.max_fields,
        });
    }
    fields.push(field);
    Ok(())
}
