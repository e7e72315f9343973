//! Line sink: formatting and delivery of finished lines.
//!
//! Output goes to stdout only; all diagnostics stay on stderr so the two
//! streams can be piped independently. Every line is flushed immediately so
//! downstream consumers never wait on block buffering.

use chrono::{DateTime, Local};
use std::io::{self, Write};

/// A finished line ready for output, with its optional timestamp already
/// rendered. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedLine {
    /// Line text, terminator stripped.
    pub text: String,
    /// Pre-rendered `YYYYMMDDHHMMSS` local-time prefix, when enabled.
    pub timestamp: Option<String>,
}

/// Consumer of finished lines.
pub trait LineSink {
    /// Write one line, including any timestamp prefix, and flush.
    fn emit(&mut self, line: &EmittedLine) -> io::Result<()>;
}

/// Render a wall-clock instant as the fixed-width `YYYYMMDDHHMMSS` prefix.
pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.format("%Y%m%d%H%M%S").to_string()
}

/// Sink writing `[TIMESTAMP ]TEXT\n` to any `Write` target, flushing after
/// each line.
pub struct WriterSink<W: Write> {
    out: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the sink and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl WriterSink<io::Stdout> {
    /// The production sink: line-formatted output on stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> LineSink for WriterSink<W> {
    fn emit(&mut self, line: &EmittedLine) -> io::Result<()> {
        if let Some(ts) = &line.timestamp {
            write!(self.out, "{ts} ")?;
        }
        writeln!(self.out, "{}", line.text)?;
        self.out.flush()
    }
}
