//! Port-specific error types.
//!
//! Keeps device-level failures separate from the reader's control flow; the
//! reconnect loop only ever inspects these for logging.

use thiserror::Error;

/// Errors that can occur while opening or reading a serial device.
#[derive(Debug, Error)]
pub enum PortError {
    /// The device path does not exist on the system.
    #[error("serial device not found: {0}")]
    NotFound(String),

    /// An OS-level I/O error occurred on an open handle.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The requested port configuration was rejected.
    #[error("configuration error: {0}")]
    Config(String),

    /// A serialport-specific error occurred.
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),
}

impl PortError {
    /// Create a NotFound error from a device path.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound(path.into())
    }

    /// Create a Config error from a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error only means "no data arrived within the read
    /// timeout". The session layer keeps waiting on these instead of
    /// tearing the connection down.
    pub fn is_read_timeout(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::TimedOut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PortError::not_found("/dev/tty.usbserial");
        assert_eq!(
            err.to_string(),
            "serial device not found: /dev/tty.usbserial"
        );

        let err = PortError::config("invalid baud rate");
        assert_eq!(err.to_string(), "configuration error: invalid baud rate");
    }

    #[test]
    fn test_read_timeout_classification() {
        let timed_out =
            PortError::Io(std::io::Error::new(std::io::ErrorKind::TimedOut, "no data"));
        assert!(timed_out.is_read_timeout());

        let broken = PortError::Io(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"));
        assert!(!broken.is_read_timeout());
    }
}
