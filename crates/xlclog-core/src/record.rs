//! Decoded telemetry records
//!
//! A [`Record`] is the typed form of one `$TLOGA` or `$TLOGB` frame. Both
//! XLC2 (2 channel) and XLC4 (4 channel) loggers map onto the same fixed set
//! of [`MAX_CHANNELS`] slots; slots the frame did not carry stay `None`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::unit_conversion::TemperatureUnit;

/// Number of channel slots in every record
pub const MAX_CHANNELS: usize = 4;

/// Fixed channel storage of a record. `Some` marks a present channel.
pub type ChannelSlots<T> = [Option<T>; MAX_CHANNELS];

/// Record variant, identified by the frame tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// `$TLOGA`: hot junction temperature and unit per channel
    #[serde(rename = "TLOGA")]
    TlogA,
    /// `$TLOGB`: cold/hot junction temperatures, status and unit per channel
    #[serde(rename = "TLOGB")]
    TlogB,
}

impl Variant {
    /// Tag that opens a frame of this variant on the wire
    pub const fn tag(self) -> &'static str {
        match self {
            Variant::TlogA => "$TLOGA",
            Variant::TlogB => "$TLOGB",
        }
    }

    /// Name used when rendering records
    pub const fn name(self) -> &'static str {
        match self {
            Variant::TlogA => "TLOGA",
            Variant::TlogB => "TLOGB",
        }
    }

    /// Number of payload fields making up one channel group
    pub const fn group_width(self) -> usize {
        match self {
            Variant::TlogA => 2,
            Variant::TlogB => 4,
        }
    }

    /// Resolve a verbatim frame tag (including the leading `$`)
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "$TLOGA" => Some(Variant::TlogA),
            "$TLOGB" => Some(Variant::TlogB),
            _ => None,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One channel of a `$TLOGA` frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TlogAChannel {
    /// Hot junction (probe) temperature
    pub hot_junction: f64,
    /// Unit both temperatures are expressed in
    pub unit: TemperatureUnit,
}

/// One channel of a `$TLOGB` frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TlogBChannel {
    /// Cold junction (reference) temperature
    pub cold_junction: f64,
    /// Hot junction (probe) temperature
    pub hot_junction: f64,
    /// Device-reported channel status code
    pub status: u8,
    /// Unit both temperatures are expressed in
    pub unit: TemperatureUnit,
}

/// A decoded telemetry frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", content = "channels")]
pub enum Record {
    /// Decoded `$TLOGA` frame
    #[serde(rename = "TLOGA")]
    TlogA(ChannelSlots<TlogAChannel>),
    /// Decoded `$TLOGB` frame
    #[serde(rename = "TLOGB")]
    TlogB(ChannelSlots<TlogBChannel>),
}

impl Record {
    /// Variant of this record
    pub fn variant(&self) -> Variant {
        match self {
            Record::TlogA(_) => Variant::TlogA,
            Record::TlogB(_) => Variant::TlogB,
        }
    }

    /// Whether the channel at `index` carried data
    pub fn is_present(&self, index: usize) -> bool {
        match self {
            Record::TlogA(slots) => slots.get(index).is_some_and(Option::is_some),
            Record::TlogB(slots) => slots.get(index).is_some_and(Option::is_some),
        }
    }

    /// Number of present channels
    pub fn channel_count(&self) -> usize {
        (0..MAX_CHANNELS).filter(|&i| self.is_present(i)).count()
    }

    /// Hot junction temperature of a present channel
    pub fn hot_junction(&self, index: usize) -> Option<f64> {
        match self {
            Record::TlogA(slots) => slots.get(index)?.map(|c| c.hot_junction),
            Record::TlogB(slots) => slots.get(index)?.map(|c| c.hot_junction),
        }
    }

    /// Unit of a present channel
    pub fn unit(&self, index: usize) -> Option<TemperatureUnit> {
        match self {
            Record::TlogA(slots) => slots.get(index)?.map(|c| c.unit),
            Record::TlogB(slots) => slots.get(index)?.map(|c| c.unit),
        }
    }

    /// Copy of this record with every present channel expressed in `unit`.
    ///
    /// Status codes are carried over untouched.
    pub fn converted_to(&self, unit: TemperatureUnit) -> Record {
        match *self {
            Record::TlogA(slots) => Record::TlogA(slots.map(|slot| {
                slot.map(|c| TlogAChannel {
                    hot_junction: c.unit.convert(c.hot_junction, unit),
                    unit,
                })
            })),
            Record::TlogB(slots) => Record::TlogB(slots.map(|slot| {
                slot.map(|c| TlogBChannel {
                    cold_junction: c.unit.convert(c.cold_junction, unit),
                    hot_junction: c.unit.convert(c.hot_junction, unit),
                    status: c.status,
                    unit,
                })
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tloga(hot: f64, unit: TemperatureUnit) -> Option<TlogAChannel> {
        Some(TlogAChannel {
            hot_junction: hot,
            unit,
        })
    }

    #[test]
    fn test_variant_from_tag() {
        assert_eq!(Variant::from_tag("$TLOGA"), Some(Variant::TlogA));
        assert_eq!(Variant::from_tag("$TLOGB"), Some(Variant::TlogB));
        assert_eq!(Variant::from_tag("TLOGA"), None);
        assert_eq!(Variant::from_tag("$tloga"), None);
        assert_eq!(Variant::from_tag(""), None);
    }

    #[test]
    fn test_presence_accessors() {
        let record = Record::TlogA([
            tloga(20.0, TemperatureUnit::Celsius),
            tloga(21.5, TemperatureUnit::Celsius),
            None,
            None,
        ]);

        assert_eq!(record.variant(), Variant::TlogA);
        assert_eq!(record.channel_count(), 2);
        assert!(record.is_present(1));
        assert!(!record.is_present(2));
        assert!(!record.is_present(17));
        assert_eq!(record.hot_junction(1), Some(21.5));
        assert_eq!(record.hot_junction(3), None);
        assert_eq!(record.unit(0), Some(TemperatureUnit::Celsius));
    }

    #[test]
    fn test_converted_to_keeps_status_and_absent_slots() {
        let record = Record::TlogB([
            Some(TlogBChannel {
                cold_junction: 0.0,
                hot_junction: 100.0,
                status: 3,
                unit: TemperatureUnit::Celsius,
            }),
            None,
            None,
            None,
        ]);

        let converted = record.converted_to(TemperatureUnit::Fahrenheit);
        let Record::TlogB(slots) = converted else {
            panic!("variant changed");
        };
        let channel = slots[0].expect("channel 0 present");
        assert!((channel.cold_junction - 32.0).abs() < 1e-9);
        assert!((channel.hot_junction - 212.0).abs() < 1e-9);
        assert_eq!(channel.status, 3);
        assert_eq!(channel.unit, TemperatureUnit::Fahrenheit);
        assert!(slots[1..].iter().all(Option::is_none));
    }

    #[test]
    fn test_serialize_shape() {
        let record = Record::TlogA([tloga(1.5, TemperatureUnit::Kelvin), None, None, None]);
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["variant"], "TLOGA");
        assert_eq!(json["channels"][0]["unit"], "K");
        assert!(json["channels"][1].is_null());
    }
}
