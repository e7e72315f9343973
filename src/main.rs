use clap::Parser;
use seriallog::config::{DeviceConfig, DEFAULT_BAUD, DEFAULT_DEVICE};
use seriallog::reader::{LineReader, SerialSessionFactory};
use seriallog::sink::WriterSink;
use tracing_subscriber::EnvFilter;

// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Reads data from the serial port and prints on stdout.",
    long_about = "Reads newline-delimited data from a serial device and prints it on stdout, \
optionally prefixing each line with a timestamp. If the device is unplugged or fails, the \
connection is retried indefinitely so the logger can run unattended."
)]
struct Args {
    /// Baud rate on the serial device.
    #[arg(short = 'b', long = "baud", default_value_t = DEFAULT_BAUD)]
    baud: u32,

    /// Enable debug output on stderr.
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Serial device to read from.
    #[arg(short = 'D', long = "device", value_name = "DEVICE", default_value = DEFAULT_DEVICE)]
    device: String,

    /// Print a timestamp at the start of each line.
    #[arg(short = 't', long = "timestamp")]
    timestamp: bool,
}

impl Args {
    fn into_config(self) -> DeviceConfig {
        DeviceConfig {
            device: self.device,
            baud_rate: self.baud,
            timestamp: self.timestamp,
            debug: self.debug,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Args::parse().into_config();

    // Diagnostics go to stderr only; stdout carries nothing but framed lines.
    let default_level = if config.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let factory = SerialSessionFactory::new(config.device.clone(), config.baud_rate);
    let reader = LineReader::new(factory, WriterSink::stdout(), config.timestamp);

    // The read loop is blocking by design; park it on a blocking task so the
    // runtime stays free to service signals. It only ends with the process.
    tokio::task::spawn_blocking(move || reader.run()).await?;

    Ok(())
}
