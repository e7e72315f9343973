//! seriallog library
//!
//! Reads newline-delimited text from a serial device and relays it to stdout,
//! reopening the device transparently whenever it disappears. Built to run
//! unattended against hardware that may be unplugged or power-cycled at any
//! time.
//!
//! # Modules
//!
//! - `config`: immutable per-run device configuration
//! - `port`: serial device abstraction layer (real port + mock)
//! - `session`: one open-to-close device lifetime with line framing
//! - `reader`: the reconnecting read loop
//! - `sink`: output formatting and delivery

pub mod config;
pub mod port;
pub mod reader;
pub mod session;
pub mod sink;

// Re-export commonly used types for convenience
pub use config::{DeviceConfig, DEFAULT_BAUD, DEFAULT_DEVICE};
pub use port::{MockSerialPort, PortError, SerialPortAdapter, SyncSerialPort};
pub use reader::{LineReader, SerialSessionFactory, SessionFactory, Step, OPEN_RETRY_BACKOFF};
pub use session::{DeviceSession, ReadOutcome, MAX_LINE_LEN};
pub use sink::{format_timestamp, EmittedLine, LineSink, WriterSink};
