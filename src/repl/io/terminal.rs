//! # Terminal I/O Implementations
//!
//! Production implementations of I/O abstractions over stdin and stdout.

use super::{LineStream, RenderStream};
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

/// Line stream reading from stdin
pub struct TerminalLineStream;

impl TerminalLineStream {
    pub fn new() -> Self {
        Self
    }
}

impl LineStream for TerminalLineStream {
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl Default for TerminalLineStream {
    fn default() -> Self {
        Self::new()
    }
}

/// Render stream writing to stdout
pub struct TerminalRenderStream {
    stdout: io::Stdout,
    terminal: bool,
}

impl TerminalRenderStream {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            terminal: atty::is(atty::Stream::Stdout),
        }
    }
}

impl Write for TerminalRenderStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stdout.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

impl RenderStream for TerminalRenderStream {
    fn is_terminal(&self) -> bool {
        self.terminal
    }
}

impl Default for TerminalRenderStream {
    fn default() -> Self {
        Self::new()
    }
}
