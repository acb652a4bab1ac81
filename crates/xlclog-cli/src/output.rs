//! Record printing for the terminal and for JSON consumers

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;
use xlclog_core::record::Record;
use xlclog_core::unit_conversion::TemperatureUnit;

/// Output format for decoded records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Tab-separated channel listing, one record per line
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Serialize)]
struct JsonLine<'a> {
    received_at: DateTime<Utc>,
    #[serde(flatten)]
    record: &'a Record,
}

/// Writes records to an output stream
pub struct RecordPrinter<W> {
    out: W,
    format: Format,
    unit: Option<TemperatureUnit>,
}

impl<W: Write> RecordPrinter<W> {
    pub fn new(out: W, format: Format, unit: Option<TemperatureUnit>) -> Self {
        Self { out, format, unit }
    }

    /// Print one record, converting it first when a display unit is set
    pub fn print(&mut self, record: &Record) -> Result<()> {
        let converted;
        let record = match self.unit {
            Some(unit) => {
                converted = record.converted_to(unit);
                &converted
            }
            None => record,
        };

        match self.format {
            Format::Text => writeln!(self.out, "{}", record)?,
            Format::Json => {
                let line = JsonLine {
                    received_at: Utc::now(),
                    record,
                };
                serde_json::to_writer(&mut self.out, &line)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xlclog_core::frame::parse_line;

    fn printed(format: Format, unit: Option<TemperatureUnit>, line: &str) -> String {
        let mut buf = Vec::new();
        let record = parse_line(line).unwrap();
        RecordPrinter::new(&mut buf, format, unit)
            .print(&record)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_text_output() {
        assert_eq!(
            printed(Format::Text, None, "$TLOGA,25,C\r\n"),
            "TLOGA\t0->25.0000C\t\n"
        );
    }

    #[test]
    fn test_text_output_with_unit() {
        assert_eq!(
            printed(Format::Text, Some(TemperatureUnit::Kelvin), "$TLOGA,0,C\r\n"),
            "TLOGA\t0->273.1500K\t\n"
        );
    }

    #[test]
    fn test_json_output() {
        let out = printed(Format::Json, None, "$TLOGB,20,300,1,C\r\n");
        let value: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();

        assert!(value["received_at"].is_string());
        assert_eq!(value["variant"], "TLOGB");
        assert_eq!(value["channels"][0]["hot_junction"], 300.0);
        assert_eq!(value["channels"][0]["status"], 1);
        assert!(value["channels"][1].is_null());
    }
}
