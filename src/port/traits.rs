//! Core trait for the device read path.
//!
//! Abstracts over the raw byte source so that both a real serial port and a
//! scripted mock can back a session interchangeably.

use super::error::PortError;

/// Trait for byte-oriented reads from a serial device.
///
/// A return of `Ok(0)` means the device side stopped producing data (the
/// serial analogue of EOF); callers treat it as a clean end of the session.
pub trait SerialPortAdapter: Send + std::fmt::Debug {
    /// Read bytes from the device into the provided buffer.
    ///
    /// Returns the number of bytes actually read. Blocks up to the port's
    /// configured read timeout; a timeout surfaces as a `PortError::Io` with
    /// kind `TimedOut` and carries no data loss.
    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, PortError>;

    /// Get the name/path of this device.
    fn name(&self) -> &str;
}
