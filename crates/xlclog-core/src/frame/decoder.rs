//! Record decoder
//!
//! Maps the positional payload fields of a [`Frame`] onto channel slots.
//! `$TLOGA` groups fields in pairs `(hot, unit)`, `$TLOGB` in quadruples
//! `(cold, hot, status, unit)`; group `i` fills slot `i`.

use super::{Frame, FrameError, NumericPolicy, ParserConfig};
use crate::record::{ChannelSlots, Record, TlogAChannel, TlogBChannel, Variant, MAX_CHANNELS};
use crate::unit_conversion::TemperatureUnit;

/// Decode a tokenized frame into a record
pub fn decode(frame: &Frame<'_>, config: &ParserConfig) -> Result<Record, FrameError> {
    let variant = frame.variant;
    let width = variant.group_width();
    let count = frame.fields.len();

    if count == 0 || count % width != 0 {
        return Err(FrameError::MalformedLayout {
            variant,
            fields: count,
            width,
        });
    }

    let groups = count / width;
    if groups > MAX_CHANNELS {
        return Err(FrameError::TooManyChannels {
            variant,
            groups,
            max: MAX_CHANNELS,
        });
    }

    match variant {
        Variant::TlogA => decode_tloga(&frame.fields, config.numeric).map(Record::TlogA),
        Variant::TlogB => decode_tlogb(&frame.fields, config.numeric).map(Record::TlogB),
    }
}

fn decode_tloga(
    fields: &[&str],
    policy: NumericPolicy,
) -> Result<ChannelSlots<TlogAChannel>, FrameError> {
    let mut slots = [None; MAX_CHANNELS];

    for (i, group) in fields.chunks_exact(2).enumerate() {
        let base = i * 2;
        slots[i] = Some(TlogAChannel {
            hot_junction: parse_temperature(group[0], base, policy)?,
            unit: parse_unit(group[1], base + 1)?,
        });
    }

    Ok(slots)
}

fn decode_tlogb(
    fields: &[&str],
    policy: NumericPolicy,
) -> Result<ChannelSlots<TlogBChannel>, FrameError> {
    let mut slots = [None; MAX_CHANNELS];

    for (i, group) in fields.chunks_exact(4).enumerate() {
        let base = i * 4;
        slots[i] = Some(TlogBChannel {
            cold_junction: parse_temperature(group[0], base, policy)?,
            hot_junction: parse_temperature(group[1], base + 1, policy)?,
            status: parse_status(group[2], base + 2, policy)?,
            unit: parse_unit(group[3], base + 3)?,
        });
    }

    Ok(slots)
}

fn numeric_error(index: usize, text: &str) -> FrameError {
    FrameError::NumericParseError {
        index,
        text: text.to_string(),
    }
}

/// Temperatures must be finite decimals; `nan`/`inf` are not readings
fn parse_temperature(text: &str, index: usize, policy: NumericPolicy) -> Result<f64, FrameError> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => match policy {
            NumericPolicy::Strict => Err(numeric_error(index, text)),
            NumericPolicy::ZeroFill => Ok(decimal_prefix(trimmed)
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .unwrap_or(0.0)),
        },
    }
}

fn parse_status(text: &str, index: usize, policy: NumericPolicy) -> Result<u8, FrameError> {
    let trimmed = text.trim();
    match trimmed.parse::<u8>() {
        Ok(value) => Ok(value),
        Err(_) => match policy {
            NumericPolicy::Strict => Err(numeric_error(index, text)),
            NumericPolicy::ZeroFill => Ok(integer_prefix_u8(trimmed)),
        },
    }
}

fn digits_from(bytes: &[u8], start: usize) -> usize {
    bytes[start.min(bytes.len())..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count()
}

/// Longest prefix of `text` that reads as a decimal number, the way C's
/// `atof` scans it. Empty when `text` does not start with a number.
fn decimal_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_digits = digits_from(bytes, end);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(bytes, end + 1);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits_from(bytes, exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    &text[..end]
}

/// Leading integer of `text` truncated to a byte, as `atoi` into a `uint8_t`
fn integer_prefix_u8(text: &str) -> u8 {
    let bytes = text.as_bytes();
    let (negative, start) = match bytes.first() {
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    };

    let value = bytes[start..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0i64, |acc, b| {
            acc.wrapping_mul(10).wrapping_add(i64::from(b - b'0'))
        });

    let value = if negative { value.wrapping_neg() } else { value };
    value as u8
}

fn parse_unit(text: &str, index: usize) -> Result<TemperatureUnit, FrameError> {
    text.chars()
        .next()
        .and_then(TemperatureUnit::from_char)
        .ok_or_else(|| FrameError::InvalidUnit {
            index,
            text: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(variant: Variant, fields: &[&'static str]) -> Frame<'static> {
        Frame {
            variant,
            fields: fields.to_vec(),
        }
    }

    #[test]
    fn test_tloga_pairs() {
        let record = decode(
            &frame(Variant::TlogA, &["20.5", "C", "-3.25", "K"]),
            &ParserConfig::DEFAULT,
        )
        .unwrap();

        assert_eq!(
            record,
            Record::TlogA([
                Some(TlogAChannel {
                    hot_junction: 20.5,
                    unit: TemperatureUnit::Celsius,
                }),
                Some(TlogAChannel {
                    hot_junction: -3.25,
                    unit: TemperatureUnit::Kelvin,
                }),
                None,
                None,
            ])
        );
    }

    #[test]
    fn test_unit_uses_first_character() {
        let record = decode(
            &frame(Variant::TlogA, &["1", "Fahr"]),
            &ParserConfig::DEFAULT,
        )
        .unwrap();
        assert_eq!(record.unit(0), Some(TemperatureUnit::Fahrenheit));
    }

    #[test]
    fn test_invalid_unit() {
        let err = decode(&frame(Variant::TlogA, &["1", "X"]), &ParserConfig::DEFAULT).unwrap_err();
        assert_eq!(
            err,
            FrameError::InvalidUnit {
                index: 1,
                text: "X".to_string()
            }
        );

        let err = decode(&frame(Variant::TlogA, &["1", ""]), &ParserConfig::DEFAULT).unwrap_err();
        assert!(matches!(err, FrameError::InvalidUnit { index: 1, .. }));
    }

    #[test]
    fn test_layout_must_match_group_width() {
        let err = decode(
            &frame(Variant::TlogB, &["1", "2", "3", "C", "5", "6"]),
            &ParserConfig::DEFAULT,
        )
        .unwrap_err();
        assert_eq!(
            err,
            FrameError::MalformedLayout {
                variant: Variant::TlogB,
                fields: 6,
                width: 4
            }
        );

        let err = decode(&frame(Variant::TlogA, &[]), &ParserConfig::DEFAULT).unwrap_err();
        assert!(matches!(err, FrameError::MalformedLayout { fields: 0, .. }));
    }

    #[test]
    fn test_more_groups_than_slots() {
        let fields = ["1", "C"].repeat(5);
        let err = decode(&frame(Variant::TlogA, &fields), &ParserConfig::DEFAULT).unwrap_err();
        assert_eq!(
            err,
            FrameError::TooManyChannels {
                variant: Variant::TlogA,
                groups: 5,
                max: 4
            }
        );
    }

    #[test]
    fn test_strict_numeric_errors() {
        let err = decode(
            &frame(Variant::TlogB, &["12.3", "abc", "7", "C"]),
            &ParserConfig::DEFAULT,
        )
        .unwrap_err();
        assert_eq!(
            err,
            FrameError::NumericParseError {
                index: 1,
                text: "abc".to_string()
            }
        );

        let err = decode(
            &frame(Variant::TlogB, &["12.3", "4.5", "256", "C"]),
            &ParserConfig::DEFAULT,
        )
        .unwrap_err();
        assert!(matches!(err, FrameError::NumericParseError { index: 2, .. }));

        let err = decode(&frame(Variant::TlogA, &["nan", "C"]), &ParserConfig::DEFAULT).unwrap_err();
        assert!(matches!(err, FrameError::NumericParseError { index: 0, .. }));
    }

    #[test]
    fn test_zero_fill_numeric_policy() {
        let config = ParserConfig {
            numeric: NumericPolicy::ZeroFill,
            ..ParserConfig::DEFAULT
        };
        let record = decode(&frame(Variant::TlogB, &["--", "4.5", "x", "C"]), &config).unwrap();

        let Record::TlogB(slots) = record else {
            panic!("expected TLOGB");
        };
        let channel = slots[0].unwrap();
        assert_eq!(channel.cold_junction, 0.0);
        assert_eq!(channel.hot_junction, 4.5);
        assert_eq!(channel.status, 0);
    }

    #[test]
    fn test_zero_fill_reads_numeric_prefix() {
        let config = ParserConfig {
            numeric: NumericPolicy::ZeroFill,
            ..ParserConfig::DEFAULT
        };
        let record = decode(
            &frame(Variant::TlogB, &["12.5x", "1e2C", "300", "C", "-.5", "+", "-1", "C"]),
            &config,
        )
        .unwrap();

        let Record::TlogB(slots) = record else {
            panic!("expected TLOGB");
        };
        let first = slots[0].unwrap();
        assert_eq!(first.cold_junction, 12.5);
        assert_eq!(first.hot_junction, 100.0);
        assert_eq!(first.status, 44);

        let second = slots[1].unwrap();
        assert_eq!(second.cold_junction, -0.5);
        assert_eq!(second.hot_junction, 0.0);
        assert_eq!(second.status, 255);
    }

    #[test]
    fn test_decimal_prefix() {
        assert_eq!(decimal_prefix("12.5x"), "12.5");
        assert_eq!(decimal_prefix("7."), "7.");
        assert_eq!(decimal_prefix(".25C"), ".25");
        assert_eq!(decimal_prefix("3e"), "3");
        assert_eq!(decimal_prefix("3e-2K"), "3e-2");
        assert_eq!(decimal_prefix("-"), "");
        assert_eq!(decimal_prefix("OPEN"), "");
    }
}
