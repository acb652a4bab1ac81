//! Text rendering of records
//!
//! One line per record, tab separated, temperatures to four decimal places:
//!
//! ```text
//! TLOGA	0->123.4500C	1->98.7600C
//! TLOGB	0->12.3000C,456.7000C
//! ```
//!
//! Rendering is display-only; the output is not meant to be parsed back.

use std::fmt;

use crate::record::Record;

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t", self.variant())?;

        match self {
            Record::TlogA(slots) => {
                for (i, channel) in slots.iter().enumerate() {
                    if let Some(c) = channel {
                        write!(f, "{}->{:.4}{}\t", i, c.hot_junction, c.unit)?;
                    }
                }
            }
            Record::TlogB(slots) => {
                for (i, channel) in slots.iter().enumerate() {
                    if let Some(c) = channel {
                        write!(
                            f,
                            "{}->{:.4}{},{:.4}{}\t",
                            i, c.cold_junction, c.unit, c.hot_junction, c.unit
                        )?;
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::record::{Record, TlogAChannel};
    use crate::unit_conversion::TemperatureUnit;

    #[test]
    fn test_absent_channels_are_skipped() {
        let record = Record::TlogA([
            None,
            Some(TlogAChannel {
                hot_junction: 1.0,
                unit: TemperatureUnit::Kelvin,
            }),
            None,
            None,
        ]);
        assert_eq!(record.to_string(), "TLOGA\t1->1.0000K\t");
    }
}
