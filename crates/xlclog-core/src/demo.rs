//! Demo Mode - Simulated XLCn logger
//!
//! Emits well-formed `$TLOGA` / `$TLOGB` lines without a device attached.
//! Each probe heats from ambient towards its own setpoint with a first-order
//! lag and some measurement noise; the cold junction drifts around room
//! temperature.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::record::{Variant, MAX_CHANNELS};
use crate::unit_conversion::TemperatureUnit;

/// Fraction of the remaining gap to the setpoint closed per frame
const HEATING_RATE: f64 = 0.05;

/// Demo logger generating telemetry lines
pub struct DemoDevice {
    variant: Variant,
    channels: usize,
    unit: TemperatureUnit,
    /// Cold junction temperature (°C)
    ambient: f64,
    /// Hot junction temperatures (°C)
    probes: [f64; MAX_CHANNELS],
    /// Setpoints the probes heat towards (°C)
    setpoints: [f64; MAX_CHANNELS],
    /// Interleave a command response every N frames
    status_every: Option<u64>,
    status_sent: bool,
    /// Data frames emitted so far
    frames: u64,
    rng: StdRng,
}

impl DemoDevice {
    /// Create a demo logger with `channels` probes (2 for an XLC2, 4 for an XLC4)
    pub fn new(variant: Variant, channels: usize) -> Self {
        Self::from_rng(variant, channels, StdRng::from_entropy())
    }

    /// Create a reproducible demo logger
    pub fn with_seed(variant: Variant, channels: usize, seed: u64) -> Self {
        Self::from_rng(variant, channels, StdRng::seed_from_u64(seed))
    }

    fn from_rng(variant: Variant, channels: usize, mut rng: StdRng) -> Self {
        let ambient = rng.gen_range(20.0..25.0);
        let mut setpoints = [0.0; MAX_CHANNELS];
        for setpoint in &mut setpoints {
            *setpoint = rng.gen_range(150.0..450.0);
        }

        Self {
            variant,
            channels: channels.clamp(1, MAX_CHANNELS),
            unit: TemperatureUnit::Celsius,
            ambient,
            probes: [ambient; MAX_CHANNELS],
            setpoints,
            status_every: None,
            status_sent: false,
            frames: 0,
            rng,
        }
    }

    /// Report temperatures in `unit`
    pub fn unit(mut self, unit: TemperatureUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Emit a `$STATUS,OK` command response after every `n` data frames
    pub fn status_every(mut self, n: u64) -> Self {
        self.status_every = (n > 0).then_some(n);
        self
    }

    /// Number of channels reported per frame
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Produce the next CR/LF terminated line
    pub fn next_line(&mut self) -> String {
        if let Some(n) = self.status_every {
            if self.frames > 0 && self.frames % n == 0 && !self.status_sent {
                self.status_sent = true;
                return "$STATUS,OK\r\n".to_string();
            }
        }
        self.status_sent = false;
        self.frames += 1;
        self.step();

        let mut line = String::from(self.variant.tag());
        for ch in 0..self.channels {
            let hot = TemperatureUnit::Celsius.convert(self.probes[ch], self.unit);
            match self.variant {
                Variant::TlogA => {
                    line.push_str(&format!(",{:.2},{}", hot, self.unit));
                }
                Variant::TlogB => {
                    let cold = TemperatureUnit::Celsius.convert(self.ambient, self.unit);
                    line.push_str(&format!(",{:.2},{:.2},0,{}", cold, hot, self.unit));
                }
            }
        }
        line.push_str("\r\n");
        line
    }

    fn step(&mut self) {
        self.ambient = (self.ambient + self.rng.gen_range(-0.02..0.02)).clamp(18.0, 30.0);

        for ch in 0..self.channels {
            let gap = self.setpoints[ch] - self.probes[ch];
            let noise = self.rng.gen_range(-0.2..0.2);
            self.probes[ch] += gap * HEATING_RATE + noise;
        }
    }
}
