//! Line sinks: where the rendered status line goes.
//!
//! The sink is established once at startup and reused for the process
//! lifetime; any failure to establish or write is fatal for the reporter,
//! since without a display there is nothing left to do.

use std::io::{self, Write};
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::error::{BarlineError, Result};

/// Command line used when no display process is specified
pub const DEFAULT_BAR_COMMAND: &str = "dzen2 -x 1400 -y 1061";

/// Consumes one formatted line per cycle
pub trait LineSink {
    /// Write a line followed by a flush so the display updates immediately.
    fn write_line(&mut self, line: &str) -> Result<()>;
}

impl LineSink for Box<dyn LineSink> {
    fn write_line(&mut self, line: &str) -> Result<()> {
        (**self).write_line(line)
    }
}

/// Sink piping lines into a spawned status-bar process.
pub struct BarSink {
    child: Child,
    stdin: ChildStdin,
}

impl BarSink {
    /// Spawn the display process and take its stdin.
    pub fn spawn(command: &str) -> Result<Self> {
        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| BarlineError::sink("empty bar command"))?;

        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| BarlineError::sink(format!("failed to spawn '{}': {}", command, e)))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| BarlineError::sink(format!("no stdin pipe for '{}'", command)))?;

        log::info!("Spawned status bar process: {}", command);

        Ok(Self { child, stdin })
    }
}

impl LineSink for BarSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.stdin, "{}", line)
            .and_then(|_| self.stdin.flush())
            .map_err(|e| BarlineError::sink(format!("bar process write: {}", e)))
    }
}

impl Drop for BarSink {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Sink writing to stdout, for bars that read their own stdin or for
/// debugging.
#[derive(Default)]
pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        Self
    }
}

impl LineSink for StdoutSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", line)
            .and_then(|_| handle.flush())
            .map_err(|e| BarlineError::sink(format!("stdout write: {}", e)))
    }
}
