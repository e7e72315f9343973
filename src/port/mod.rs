//! Port abstraction layer for the serial device.
//!
//! Provides the read trait plus real and mock implementations, enabling the
//! session layer to be tested without hardware.

pub mod error;
pub mod mock;
pub mod sync_port;
pub mod traits;

pub use error::PortError;
pub use mock::{MockSerialPort, ScriptedRead};
pub use sync_port::SyncSerialPort;
pub use traits::SerialPortAdapter;
