//! Serial port access
//!
//! XLC2/XLC4 loggers talk RS-232, either on a native port (`/dev/ttyS*`,
//! `COMn`) or through a USB adapter (`/dev/ttyUSB*`). The line is fixed at
//! 8 data bits, no parity, 1 stop bit, no flow control; only the baud rate is
//! configurable on the device.

use serde::{Deserialize, Serialize};
use serialport::{SerialPortInfo, SerialPortType};
use std::collections::HashMap;
#[cfg(target_os = "linux")]
use std::fs;
use tokio_serial::{
    DataBits, ErrorKind, FlowControl, Parity, SerialPortBuilderExt, SerialStream, StopBits,
};

use super::SourceError;

/// Factory default baud rate of XLCn loggers
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Serial line settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialConfig {
    /// Baud rate configured on the device
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
}

fn default_baud_rate() -> u32 {
    DEFAULT_BAUD_RATE
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
        }
    }
}

/// Information about an available serial port
#[derive(Debug, Clone, Serialize)]
pub struct PortInfo {
    /// Port name (e.g., "/dev/ttyUSB0" or "COM3")
    pub name: String,

    /// USB vendor ID (if USB device)
    pub vid: Option<u16>,

    /// USB product ID (if USB device)
    pub pid: Option<u16>,

    /// Product name (if available)
    pub product: Option<String>,
}

impl PortInfo {
    fn bare(name: String) -> Self {
        Self {
            name,
            vid: None,
            pid: None,
            product: None,
        }
    }
}

impl From<SerialPortInfo> for PortInfo {
    fn from(info: SerialPortInfo) -> Self {
        match info.port_type {
            SerialPortType::UsbPort(usb) => Self {
                name: info.port_name,
                vid: Some(usb.vid),
                pid: Some(usb.pid),
                product: usb.product,
            },
            _ => Self::bare(info.port_name),
        }
    }
}

/// Sort key placing USB adapters first, then native RS-232 ports, then
/// everything else; numbered ports sort numerically.
fn port_sort_key(name: &str) -> (u8, usize, String) {
    let basename = name.rsplit('/').next().unwrap_or(name);
    for (rank, prefix) in [(0, "ttyUSB"), (1, "ttyS"), (2, "COM")] {
        if let Some(rest) = basename.strip_prefix(prefix) {
            let num = rest.parse::<usize>().unwrap_or(usize::MAX);
            return (rank, num, basename.to_string());
        }
    }
    (3, 0, basename.to_string())
}

/// List serial ports a logger may be attached to
pub fn list_ports() -> Vec<PortInfo> {
    let mut map: HashMap<String, PortInfo> = HashMap::new();
    for info in serialport::available_ports().unwrap_or_default() {
        let port = PortInfo::from(info);
        map.entry(port.name.clone()).or_insert(port);
    }

    // USB adapters that udev has not reported yet still show up in /dev
    #[cfg(target_os = "linux")]
    if let Ok(entries) = fs::read_dir("/dev") {
        for entry in entries.flatten() {
            if let Some(fname) = entry.file_name().to_str() {
                if fname.starts_with("ttyUSB") {
                    let full = format!("/dev/{}", fname);
                    map.entry(full.clone()).or_insert_with(|| PortInfo::bare(full));
                }
            }
        }
    }

    let mut ports: Vec<PortInfo> = map.into_values().collect();
    ports.sort_by_key(|p| port_sort_key(&p.name));
    ports
}

/// Open `path` as an async serial stream at the configured baud rate, 8N1
pub fn open_serial(path: &str, config: &SerialConfig) -> Result<SerialStream, SourceError> {
    tracing::debug!(port = path, baud = config.baud_rate, "Opening serial port");

    tokio_serial::new(path, config.baud_rate)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .open_native_async()
        .map_err(|e| match e.kind {
            ErrorKind::NoDevice | ErrorKind::Io(std::io::ErrorKind::NotFound) => {
                SourceError::PortNotFound(path.to_string())
            }
            _ => SourceError::SerialError(e.to_string()),
        })
}
