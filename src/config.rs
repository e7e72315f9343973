//! Device configuration.
//!
//! Built once from the CLI at startup and read-only afterwards; both the
//! session factory and the reader borrow it rather than consulting any
//! process-wide state.

/// Default serial device path.
pub const DEFAULT_DEVICE: &str = "/dev/tty.usbserial";

/// Default baud rate.
pub const DEFAULT_BAUD: u32 = 9600;

/// Immutable per-run configuration for the device and output formatting.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// System path of the serial device.
    pub device: String,
    /// Line speed in bits per second.
    pub baud_rate: u32,
    /// Prefix each output line with a local-time timestamp.
    pub timestamp: bool,
    /// Emit debug diagnostics on stderr.
    pub debug: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            device: DEFAULT_DEVICE.to_string(),
            baud_rate: DEFAULT_BAUD,
            timestamp: false,
            debug: false,
        }
    }
}
