//! Synchronous serial port implementation.
//!
//! Wraps the `serialport` crate with our `SerialPortAdapter` trait so the
//! session layer can be tested against a mock. Opening configures the tty for
//! raw byte-stream reads: 8 data bits, no parity, one stop bit, no flow
//! control, canonical line editing and echo disabled (the crate sets the
//! termios flags on open).

use super::error::PortError;
use super::traits::SerialPortAdapter;
use std::io::Read;
use std::time::Duration;

/// Read timeout handed to the `serialport` crate, which refuses to open a
/// port without one. The session layer retries timed-out reads, so the value
/// only bounds how often the blocking read wakes up empty-handed.
const READ_TIMEOUT: Duration = Duration::from_millis(500);

/// Synchronous serial port wrapping `serialport::SerialPort`.
pub struct SyncSerialPort {
    /// The underlying serial port implementation.
    port: Box<dyn serialport::SerialPort>,
    /// The device path for identification and diagnostics.
    name: String,
}

impl SyncSerialPort {
    /// Open and fully configure a serial device.
    ///
    /// Either returns a ready-to-read port or an error; there is no
    /// partially-configured state visible to the caller.
    ///
    /// # Arguments
    /// * `path` - The system path to the device (e.g., "/dev/tty.usbserial")
    /// * `baud_rate` - Line speed in bits per second
    pub fn open(path: &str, baud_rate: u32) -> Result<Self, PortError> {
        let port = serialport::new(path, baud_rate)
            .data_bits(serialport::DataBits::Eight)
            .flow_control(serialport::FlowControl::None)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .timeout(READ_TIMEOUT)
            .open()
            .map_err(|e| match e.kind() {
                serialport::ErrorKind::NoDevice => PortError::not_found(path),
                serialport::ErrorKind::InvalidInput => PortError::config(e.to_string()),
                _ => PortError::Serial(e),
            })?;

        Ok(Self {
            port,
            name: path.to_string(),
        })
    }
}

impl SerialPortAdapter for SyncSerialPort {
    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, PortError> {
        self.port.read(buffer).map_err(PortError::Io)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for SyncSerialPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncSerialPort")
            .field("name", &self.name)
            .field("baud_rate", &self.port.baud_rate())
            .finish()
    }
}
