//! Temperature Units
//!
//! XLCn loggers report every channel in one of three units, selected on the
//! device and echoed as the unit field of each channel group:
//! - `C`: degrees Celsius
//! - `F`: degrees Fahrenheit
//! - `K`: Kelvin

use serde::{Deserialize, Serialize};
use std::fmt;

/// Offset between the Kelvin and Celsius scales
const KELVIN_OFFSET: f64 = 273.15;

/// Convert Celsius to Fahrenheit
pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

/// Convert Fahrenheit to Celsius
pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

/// Convert Celsius to Kelvin
pub fn celsius_to_kelvin(c: f64) -> f64 {
    c + KELVIN_OFFSET
}

/// Convert Kelvin to Celsius
pub fn kelvin_to_celsius(k: f64) -> f64 {
    k - KELVIN_OFFSET
}

/// Unit of a reported temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureUnit {
    /// Degrees Celsius
    #[serde(rename = "C")]
    Celsius,
    /// Degrees Fahrenheit
    #[serde(rename = "F")]
    Fahrenheit,
    /// Kelvin
    #[serde(rename = "K")]
    Kelvin,
}

impl TemperatureUnit {
    /// Parse the single-character unit code used on the wire
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(TemperatureUnit::Celsius),
            'F' => Some(TemperatureUnit::Fahrenheit),
            'K' => Some(TemperatureUnit::Kelvin),
            _ => None,
        }
    }

    /// Single-character unit code
    pub fn as_char(self) -> char {
        match self {
            TemperatureUnit::Celsius => 'C',
            TemperatureUnit::Fahrenheit => 'F',
            TemperatureUnit::Kelvin => 'K',
        }
    }

    /// Convert `value`, expressed in this unit, to `target`
    pub fn convert(self, value: f64, target: TemperatureUnit) -> f64 {
        if self == target {
            return value;
        }

        let celsius = match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => fahrenheit_to_celsius(value),
            TemperatureUnit::Kelvin => kelvin_to_celsius(value),
        };

        match target {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius_to_fahrenheit(celsius),
            TemperatureUnit::Kelvin => celsius_to_kelvin(celsius),
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl std::str::FromStr for TemperatureUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next().map(|c| c.to_ascii_uppercase()), chars.next()) {
            (Some(c), None) => {
                TemperatureUnit::from_char(c).ok_or_else(|| format!("unknown unit '{}'", s))
            }
            _ => Err(format!("unknown unit '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_celsius_fahrenheit_conversion() {
        assert!((celsius_to_fahrenheit(0.0) - 32.0).abs() < 0.01);
        assert!((fahrenheit_to_celsius(32.0) - 0.0).abs() < 0.01);
        assert!((celsius_to_fahrenheit(100.0) - 212.0).abs() < 0.01);
        assert!((fahrenheit_to_celsius(212.0) - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_celsius_kelvin_conversion() {
        assert!((celsius_to_kelvin(0.0) - 273.15).abs() < 1e-9);
        assert!((kelvin_to_celsius(0.0) + 273.15).abs() < 1e-9);
    }

    #[test]
    fn test_convert_between_units() {
        let f = TemperatureUnit::Kelvin.convert(373.15, TemperatureUnit::Fahrenheit);
        assert!((f - 212.0).abs() < 1e-9);
        assert_eq!(TemperatureUnit::Celsius.convert(-40.0, TemperatureUnit::Celsius), -40.0);
        let c = TemperatureUnit::Fahrenheit.convert(-40.0, TemperatureUnit::Celsius);
        assert!((c + 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_unit_codes() {
        for unit in [
            TemperatureUnit::Celsius,
            TemperatureUnit::Fahrenheit,
            TemperatureUnit::Kelvin,
        ] {
            assert_eq!(TemperatureUnit::from_char(unit.as_char()), Some(unit));
        }
        assert_eq!(TemperatureUnit::from_char('c'), None);
        assert_eq!("f".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Fahrenheit));
        assert!("CF".parse::<TemperatureUnit>().is_err());
    }
}
