//! Device session: one open-to-close lifetime of a serial device handle.
//!
//! A session only exists fully configured; the port layer either hands back a
//! ready adapter or an error. Each session owns its own line buffer, so an
//! unterminated fragment from a dead session can never leak into the next one.

use crate::port::{PortError, SerialPortAdapter};
use tracing::debug;

/// Maximum number of bytes accumulated for a single line. Input exceeding
/// this without a terminator is delivered truncated rather than dropped.
pub const MAX_LINE_LEN: usize = 100;

/// Result of waiting for the next line on an open session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A complete line, terminator stripped (or a truncated over-length line).
    Line(String),
    /// The device side stopped producing data without an OS error. The
    /// session is spent; the caller must drop it and reopen.
    EndOfSession,
}

/// One open, configured connection to the serial device.
///
/// Owned exclusively by the reconnect loop; dropped on any fault or
/// end-of-session, which releases the underlying handle.
pub struct DeviceSession {
    port: Box<dyn SerialPortAdapter>,
    /// Reusable accumulator for the line in flight. Cleared on every call to
    /// [`read_line`](Self::read_line); never carries data across lines.
    line: Vec<u8>,
    max_len: usize,
}

impl DeviceSession {
    /// Wrap an already-open port adapter.
    pub fn new(port: Box<dyn SerialPortAdapter>) -> Self {
        Self::with_max_len(port, MAX_LINE_LEN)
    }

    /// Wrap an adapter with a custom line-length cap.
    pub fn with_max_len(port: Box<dyn SerialPortAdapter>, max_len: usize) -> Self {
        Self {
            port,
            line: Vec::with_capacity(max_len),
            max_len,
        }
    }

    /// Device path of the underlying port, for diagnostics.
    pub fn device_name(&self) -> &str {
        self.port.name()
    }

    /// Block until a full line, end-of-session, or an error.
    ///
    /// Reads byte-at-a-time so the stream position after a `\n` is exactly
    /// the start of the next line. Read timeouts from the port are retried
    /// here; they just mean no byte has arrived yet. A zero-length read is
    /// the device's end-of-session signal and discards any buffered
    /// fragment. Errors take precedence over end-of-session: a failed read
    /// never degrades into a clean EOF.
    ///
    /// Lines longer than the cap are returned truncated at `max_len` bytes;
    /// the remainder of the oversized record becomes the next line.
    pub fn read_line(&mut self) -> Result<ReadOutcome, PortError> {
        self.line.clear();

        loop {
            let mut byte = [0u8; 1];
            match self.port.read_bytes(&mut byte) {
                Ok(0) => return Ok(ReadOutcome::EndOfSession),
                Ok(_) => {
                    if byte[0] == b'\n' {
                        return Ok(ReadOutcome::Line(self.take_line()));
                    }
                    self.line.push(byte[0]);
                    if self.line.len() >= self.max_len {
                        debug!(
                            device = self.port.name(),
                            max_len = self.max_len,
                            "line exceeded max length, delivering truncated"
                        );
                        return Ok(ReadOutcome::Line(self.take_line()));
                    }
                }
                Err(e) if e.is_read_timeout() => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn take_line(&mut self) -> String {
        String::from_utf8_lossy(&self.line).into_owned()
    }
}

impl std::fmt::Debug for DeviceSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceSession")
            .field("device", &self.port.name())
            .field("buffered", &self.line.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::MockSerialPort;
    use pretty_assertions::assert_eq;

    fn session_over(port: MockSerialPort) -> DeviceSession {
        DeviceSession::new(Box::new(port))
    }

    #[test]
    fn test_frames_terminated_lines_in_order() {
        let mut port = MockSerialPort::new("MOCK0");
        port.enqueue_data(b"HELLO\nWORLD\n");
        let mut session = session_over(port);

        assert_eq!(
            session.read_line().unwrap(),
            ReadOutcome::Line("HELLO".to_string())
        );
        assert_eq!(
            session.read_line().unwrap(),
            ReadOutcome::Line("WORLD".to_string())
        );
        assert_eq!(session.read_line().unwrap(), ReadOutcome::EndOfSession);
    }

    #[test]
    fn test_terminator_is_stripped_not_skipped() {
        let mut port = MockSerialPort::new("MOCK0");
        // Terminator split across two read chunks.
        port.enqueue_data(b"AB");
        port.enqueue_data(b"\nCD\n");
        let mut session = session_over(port);

        assert_eq!(
            session.read_line().unwrap(),
            ReadOutcome::Line("AB".to_string())
        );
        assert_eq!(
            session.read_line().unwrap(),
            ReadOutcome::Line("CD".to_string())
        );
    }

    #[test]
    fn test_overlength_line_truncates_and_resumes() {
        let mut port = MockSerialPort::new("MOCK0");
        let long = vec![b'A'; MAX_LINE_LEN];
        port.enqueue_data(&long);
        port.enqueue_data(b"BB\n");
        let mut session = session_over(port);

        match session.read_line().unwrap() {
            ReadOutcome::Line(text) => {
                assert_eq!(text.len(), MAX_LINE_LEN);
                assert!(text.bytes().all(|b| b == b'A'));
            }
            other => panic!("expected truncated line, got {other:?}"),
        }
        // Reading resumes cleanly at the byte after the truncation point.
        assert_eq!(
            session.read_line().unwrap(),
            ReadOutcome::Line("BB".to_string())
        );
    }

    #[test]
    fn test_eof_discards_unterminated_fragment() {
        let mut port = MockSerialPort::new("MOCK0");
        port.enqueue_data(b"PART");
        port.enqueue_eof();
        let mut session = session_over(port);

        assert_eq!(session.read_line().unwrap(), ReadOutcome::EndOfSession);
    }

    #[test]
    fn test_error_takes_precedence_over_eof() {
        let mut port = MockSerialPort::new("MOCK0");
        port.enqueue_data(b"PART");
        port.enqueue_error(std::io::ErrorKind::BrokenPipe);
        port.enqueue_eof();
        let mut session = session_over(port);

        let err = session.read_line().unwrap_err();
        assert!(matches!(err, PortError::Io(_)));
    }

    #[test]
    fn test_read_timeout_keeps_waiting() {
        let mut port = MockSerialPort::new("MOCK0");
        port.enqueue_data(b"SL");
        port.enqueue_error(std::io::ErrorKind::TimedOut);
        port.enqueue_data(b"OW\n");
        let mut session = session_over(port);

        assert_eq!(
            session.read_line().unwrap(),
            ReadOutcome::Line("SLOW".to_string())
        );
    }

    #[test]
    fn test_non_utf8_bytes_replaced_lossily() {
        let mut port = MockSerialPort::new("MOCK0");
        port.enqueue_data(&[b'O', b'K', 0xFF, b'\n']);
        let mut session = session_over(port);

        match session.read_line().unwrap() {
            ReadOutcome::Line(text) => assert_eq!(text, "OK\u{FFFD}"),
            other => panic!("expected lossy line, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_line() {
        let mut port = MockSerialPort::new("MOCK0");
        port.enqueue_data(b"\nX\n");
        let mut session = session_over(port);

        assert_eq!(
            session.read_line().unwrap(),
            ReadOutcome::Line(String::new())
        );
        assert_eq!(
            session.read_line().unwrap(),
            ReadOutcome::Line("X".to_string())
        );
    }
}
