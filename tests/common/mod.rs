//! Shared test doubles for the integration suite.

use seriallog::port::{MockSerialPort, PortError};
use seriallog::reader::SessionFactory;
use seriallog::session::DeviceSession;
use seriallog::sink::{EmittedLine, LineSink};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Factory replaying a fixed sequence of open outcomes. Once exhausted,
/// every further open fails.
pub struct ScriptedFactory {
    outcomes: VecDeque<Result<MockSerialPort, PortError>>,
}

impl ScriptedFactory {
    pub fn new(outcomes: Vec<Result<MockSerialPort, PortError>>) -> Self {
        Self {
            outcomes: outcomes.into(),
        }
    }
}

impl SessionFactory for ScriptedFactory {
    fn open_session(&mut self) -> Result<DeviceSession, PortError> {
        match self.outcomes.pop_front() {
            Some(Ok(port)) => Ok(DeviceSession::new(Box::new(port))),
            Some(Err(e)) => Err(e),
            None => Err(PortError::not_found("script exhausted")),
        }
    }

    fn device_path(&self) -> &str {
        "MOCK0"
    }
}

/// Sink capturing every emitted line for later assertions. Clones share the
/// captured list, so a test can hand one clone to the reader and keep one.
#[derive(Clone, Default)]
pub struct CaptureSink {
    lines: Arc<Mutex<Vec<EmittedLine>>>,
}

impl CaptureSink {
    pub fn captured(&self) -> Vec<EmittedLine> {
        self.lines.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.captured().into_iter().map(|l| l.text).collect()
    }
}

impl LineSink for CaptureSink {
    fn emit(&mut self, line: &EmittedLine) -> std::io::Result<()> {
        self.lines.lock().unwrap().push(line.clone());
        Ok(())
    }
}

/// Convenience for a factory error standing in for a missing device.
pub fn open_failure() -> PortError {
    PortError::not_found("/dev/tty.usbserial")
}
