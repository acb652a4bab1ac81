//! `xlclog` command line front end

mod logging;
mod output;
mod settings;

use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::AsyncRead;
use xlclog_core::demo::DemoDevice;
use xlclog_core::frame::{NumericPolicy, Parser};
use xlclog_core::record::{Variant, MAX_CHANNELS};
use xlclog_core::source::{self, FrameReader, ReadStats};
use xlclog_core::unit_conversion::TemperatureUnit;

use output::{Format, RecordPrinter};

/// Data frames between simulated `$STATUS` responses in `xlclog demo`
const DEMO_STATUS_EVERY: u64 = 10;

#[derive(ClapParser)]
#[command(name = "xlclog", version, about = "Read XLC2/XLC4 thermocouple logger output")]
struct Cli {
    /// Output format for decoded records
    #[arg(long, value_enum, global = true, default_value_t = Format::Text)]
    format: Format,

    /// Convert temperatures to this unit (C, F or K) before printing
    #[arg(long, global = true)]
    unit: Option<TemperatureUnit>,

    /// Treat unparseable numeric fields as zero instead of rejecting the line
    #[arg(long, global = true)]
    lenient: bool,

    /// Configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read frames from a serial port
    Listen {
        /// Serial port path, e.g. /dev/ttyUSB0 or COM3
        port: String,
        /// Override the configured baud rate
        #[arg(long)]
        baud: Option<u32>,
    },
    /// Read frames from a capture file, or `-` for stdin
    Replay { input: PathBuf },
    /// Print frames from a simulated logger
    Demo {
        #[arg(long, value_enum, default_value_t = DemoVariant::A)]
        variant: DemoVariant,
        #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(1..=MAX_CHANNELS as i64))]
        channels: u8,
        /// Stop after this many lines
        #[arg(long)]
        count: Option<u64>,
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Parse a single line given on the command line
    Parse {
        /// Frame text; `\r` and `\n` escapes are honored
        line: String,
    },
    /// List available serial ports
    Ports,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DemoVariant {
    /// XLC2-style `$TLOGA` frames
    A,
    /// XLC4-style `$TLOGB` frames
    B,
}

impl From<DemoVariant> for Variant {
    fn from(value: DemoVariant) -> Self {
        match value {
            DemoVariant::A => Variant::TlogA,
            DemoVariant::B => Variant::TlogB,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = settings::load(cli.config.as_deref())?;
    if cli.lenient {
        config.parser.numeric = NumericPolicy::ZeroFill;
    }
    let parser = Parser::new(config.parser);
    let mut printer = RecordPrinter::new(io::stdout().lock(), cli.format, cli.unit);

    match cli.command {
        Commands::Listen { port, baud } => {
            let mut serial = config.serial.clone();
            if let Some(baud) = baud {
                serial.baud_rate = baud;
            }
            let stream = source::open_serial(&port, &serial)
                .with_context(|| format!("Failed to open {}", port))?;
            tracing::info!(port = %port, baud = serial.baud_rate, "Listening");
            let stats = run_reader(stream, parser, &mut printer).await?;
            eprintln!("{}", stats);
        }
        Commands::Replay { input } => {
            let stats = if input.as_os_str() == "-" {
                run_reader(tokio::io::stdin(), parser, &mut printer).await?
            } else {
                let file = tokio::fs::File::open(&input)
                    .await
                    .with_context(|| format!("Failed to open {}", input.display()))?;
                run_reader(file, parser, &mut printer).await?
            };
            eprintln!("{}", stats);
        }
        Commands::Demo {
            variant,
            channels,
            count,
            interval_ms,
            seed,
        } => {
            let variant = Variant::from(variant);
            let channels = usize::from(channels);
            let device = match seed {
                Some(seed) => DemoDevice::with_seed(variant, channels, seed),
                None => DemoDevice::new(variant, channels),
            }
            .status_every(DEMO_STATUS_EVERY);
            let stats = run_demo(device, count, interval_ms, &parser, &mut printer).await?;
            eprintln!("{}", stats);
        }
        Commands::Parse { line } => {
            let mut line = unescape(&line);
            if !line.ends_with(['\r', '\n']) {
                line.push_str("\r\n");
            }
            match parser.parse_line(&line) {
                Ok(record) => printer.print(&record)?,
                Err(e) => bail!("{}", e),
            }
        }
        Commands::Ports => {
            let ports = source::list_ports();
            if ports.is_empty() {
                eprintln!("No serial ports found");
            }
            for port in ports {
                match (port.vid, port.pid) {
                    (Some(vid), Some(pid)) => println!(
                        "{}\t{:04x}:{:04x}\t{}",
                        port.name,
                        vid,
                        pid,
                        port.product.as_deref().unwrap_or("")
                    ),
                    _ => println!("{}", port.name),
                }
            }
        }
    }

    Ok(())
}

/// Print every record from `reader` until end of stream or Ctrl-C
async fn run_reader<R, W>(
    reader: R,
    parser: Parser,
    printer: &mut RecordPrinter<W>,
) -> Result<ReadStats>
where
    R: AsyncRead + Unpin,
    W: io::Write,
{
    let mut frames = FrameReader::new(reader, parser);

    loop {
        tokio::select! {
            next = frames.next_record() => match next? {
                Some(record) => printer.print(&record)?,
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    Ok(frames.stats())
}

async fn run_demo<W: io::Write>(
    mut device: DemoDevice,
    count: Option<u64>,
    interval_ms: u64,
    parser: &Parser,
    printer: &mut RecordPrinter<W>,
) -> Result<ReadStats> {
    let mut stats = ReadStats::default();
    let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms.max(1)));

    while count.map_or(true, |n| stats.lines < n) {
        tokio::select! {
            _ = ticker.tick() => {
                let line = device.next_line();
                let result = parser.parse_line(&line);
                stats.count(&result);
                match result {
                    Ok(record) => printer.print(&record)?,
                    Err(e) => tracing::debug!(line = %line.escape_debug(), "{}", e),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(stats)
}

/// Expand `\r`, `\n` and `\\` escapes typed on a shell command line
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
