//! Reconnecting line reader.
//!
//! Drives the infinite read loop and keeps line delivery going across device
//! churn: any fault or clean disconnect discards the current session and a
//! fresh one is opened, with a fixed backoff only between failed open
//! attempts. All faults are absorbed here; nothing propagates out of the
//! loop during normal operation.

use crate::port::{PortError, SyncSerialPort};
use crate::session::{DeviceSession, ReadOutcome};
use crate::sink::{format_timestamp, EmittedLine, LineSink};
use chrono::Local;
use std::time::Duration;
use tracing::{debug, error};

/// Delay between consecutive failed open attempts, to avoid busy-looping
/// against a device that stays absent.
pub const OPEN_RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Source of fresh device sessions, abstracted so tests can script a
/// sequence of open failures and canned sessions.
pub trait SessionFactory {
    /// Open and configure the device, yielding a ready session.
    fn open_session(&mut self) -> Result<DeviceSession, PortError>;

    /// Device path, for diagnostics.
    fn device_path(&self) -> &str;
}

/// Production factory opening the real serial device.
#[derive(Debug, Clone)]
pub struct SerialSessionFactory {
    path: String,
    baud_rate: u32,
}

impl SerialSessionFactory {
    pub fn new(path: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            path: path.into(),
            baud_rate,
        }
    }
}

impl SessionFactory for SerialSessionFactory {
    fn open_session(&mut self) -> Result<DeviceSession, PortError> {
        let port = SyncSerialPort::open(&self.path, self.baud_rate)?;
        Ok(DeviceSession::new(Box::new(port)))
    }

    fn device_path(&self) -> &str {
        &self.path
    }
}

/// Connection state of the reader. The session is owned by the variant, so
/// leaving `Connected` is the only way to close it and it can never be
/// closed twice.
#[derive(Debug)]
enum SessionState {
    Disconnected,
    Connected(DeviceSession),
}

/// What a single turn of the loop did. Returned by [`LineReader::step`] so
/// tests can observe transitions; `run` just discards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The device was opened and configured.
    SessionOpened,
    /// Opening failed; one backoff wait was applied.
    OpenFailed,
    /// A line was delivered to the sink.
    LineEmitted,
    /// The device signalled a clean end of session; reopening immediately.
    SessionEnded,
    /// A read fault killed the session; reopening immediately.
    ReadFailed,
}

/// The resilient read loop: requests sessions from the factory, pulls lines,
/// and reconnects on any fault. Runs until the process is terminated.
pub struct LineReader<F: SessionFactory, S: LineSink> {
    factory: F,
    sink: S,
    /// Prefix emitted lines with a local-time timestamp.
    timestamp: bool,
    backoff: Duration,
    state: SessionState,
}

impl<F: SessionFactory, S: LineSink> LineReader<F, S> {
    pub fn new(factory: F, sink: S, timestamp: bool) -> Self {
        Self {
            factory,
            sink,
            timestamp,
            backoff: OPEN_RETRY_BACKOFF,
            state: SessionState::Disconnected,
        }
    }

    /// Override the open-retry backoff (tests use zero).
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Run forever. Only process-level termination ends the loop.
    pub fn run(mut self) {
        loop {
            self.step();
        }
    }

    /// Perform one state transition: an open attempt when disconnected, or
    /// one blocking line read when connected.
    pub fn step(&mut self) -> Step {
        match std::mem::replace(&mut self.state, SessionState::Disconnected) {
            SessionState::Disconnected => self.try_open(),
            SessionState::Connected(session) => self.pump_line(session),
        }
    }

    fn try_open(&mut self) -> Step {
        debug!(device = self.factory.device_path(), "opening serial device");
        match self.factory.open_session() {
            Ok(session) => {
                self.state = SessionState::Connected(session);
                Step::SessionOpened
            }
            Err(e) => {
                error!(
                    device = self.factory.device_path(),
                    error = %e,
                    "error opening serial device"
                );
                std::thread::sleep(self.backoff);
                Step::OpenFailed
            }
        }
    }

    fn pump_line(&mut self, mut session: DeviceSession) -> Step {
        match session.read_line() {
            Ok(ReadOutcome::Line(text)) => {
                self.deliver(text);
                self.state = SessionState::Connected(session);
                Step::LineEmitted
            }
            Ok(ReadOutcome::EndOfSession) => {
                debug!(
                    device = session.device_name(),
                    "serial device reported end of stream, reopening"
                );
                Step::SessionEnded
            }
            Err(e) => {
                error!(
                    device = session.device_name(),
                    error = %e,
                    "error reading from serial device"
                );
                Step::ReadFailed
            }
        }
    }

    fn deliver(&mut self, text: String) {
        // The session already strips the terminator; tolerate one anyway.
        let text = match text.strip_suffix('\n') {
            Some(stripped) => stripped.to_string(),
            None => text,
        };

        debug!(line = %text, "input line");

        let line = EmittedLine {
            timestamp: self.timestamp.then(|| format_timestamp(Local::now())),
            text,
        };
        if let Err(e) = self.sink.emit(&line) {
            error!(error = %e, "error writing line to output");
        }
    }
}
