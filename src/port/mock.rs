//! Mock serial port for testing.
//!
//! Provides a `MockSerialPort` that replays a script of read outcomes without
//! requiring hardware: data chunks, a clean end-of-stream, or injected I/O
//! errors, in the order they were enqueued.

use super::error::PortError;
use super::traits::SerialPortAdapter;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One scripted read outcome.
#[derive(Debug, Clone)]
pub enum ScriptedRead {
    /// Bytes to be delivered to subsequent reads, in order.
    Data(Vec<u8>),
    /// The device reports end-of-stream (a zero-length read).
    Eof,
    /// The read fails with an I/O error of the given kind.
    Error(std::io::ErrorKind),
}

#[derive(Debug, Default)]
struct MockPortState {
    /// Outcomes not yet reached.
    script: VecDeque<ScriptedRead>,
    /// Bytes from the current `Data` entry still waiting to be read.
    pending: VecDeque<u8>,
}

/// Mock serial port implementation for testing.
///
/// Clones share state, so a test can keep a handle while a session owns the
/// boxed adapter. Once the script is exhausted every read reports
/// end-of-stream.
///
/// # Example
/// ```
/// use seriallog::port::{MockSerialPort, SerialPortAdapter};
///
/// let mut port = MockSerialPort::new("MOCK0");
/// port.enqueue_data(b"PING\n");
///
/// let mut buffer = [0u8; 8];
/// let n = port.read_bytes(&mut buffer).unwrap();
/// assert_eq!(&buffer[..n], b"PING\n");
///
/// // Script exhausted: the device has gone away.
/// assert_eq!(port.read_bytes(&mut buffer).unwrap(), 0);
/// ```
#[derive(Clone)]
pub struct MockSerialPort {
    name: String,
    state: Arc<Mutex<MockPortState>>,
}

impl MockSerialPort {
    /// Create a new mock port with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Arc::new(Mutex::new(MockPortState::default())),
        }
    }

    /// Enqueue bytes to be returned by subsequent reads.
    pub fn enqueue_data(&mut self, data: &[u8]) {
        let mut state = self.state.lock().unwrap();
        state.script.push_back(ScriptedRead::Data(data.to_vec()));
    }

    /// Enqueue a clean end-of-stream.
    pub fn enqueue_eof(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.script.push_back(ScriptedRead::Eof);
    }

    /// Enqueue a read failure of the given I/O error kind.
    pub fn enqueue_error(&mut self, kind: std::io::ErrorKind) {
        let mut state = self.state.lock().unwrap();
        state.script.push_back(ScriptedRead::Error(kind));
    }

    /// Number of data bytes not yet consumed by reads.
    pub fn remaining_bytes(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.pending.len()
            + state
                .script
                .iter()
                .map(|s| match s {
                    ScriptedRead::Data(d) => d.len(),
                    _ => 0,
                })
                .sum::<usize>()
    }
}

impl SerialPortAdapter for MockSerialPort {
    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, PortError> {
        let mut state = self.state.lock().unwrap();

        loop {
            if !state.pending.is_empty() {
                let mut bytes_read = 0;
                for byte in buffer.iter_mut() {
                    match state.pending.pop_front() {
                        Some(b) => {
                            *byte = b;
                            bytes_read += 1;
                        }
                        None => break,
                    }
                }
                return Ok(bytes_read);
            }

            match state.script.pop_front() {
                Some(ScriptedRead::Data(data)) => state.pending.extend(data),
                Some(ScriptedRead::Eof) | None => return Ok(0),
                Some(ScriptedRead::Error(kind)) => {
                    return Err(PortError::Io(std::io::Error::new(kind, "injected fault")))
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for MockSerialPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSerialPort")
            .field("name", &self.name)
            .field("remaining_bytes", &self.remaining_bytes())
            .finish()
    }
}
