//! # Mock I/O Implementations for Testing
//!
//! Scripted input and captured output for driving the controller without a
//! terminal.

use super::{LineStream, RenderStream};
use anyhow::Result;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Line stream replaying pre-programmed lines, then reporting end of input
pub struct MockLineStream {
    lines: VecDeque<String>,
}

impl MockLineStream {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
    }
}

impl LineStream for MockLineStream {
    fn read_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// Render stream capturing everything written into a shared buffer
///
/// Clones share the buffer, so a test keeps one clone and hands the other to
/// the controller.
#[derive(Clone, Default)]
pub struct MockRenderStream {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MockRenderStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(|p| p.into_inner());
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut buffer = self.buffer.lock().unwrap_or_else(|p| p.into_inner());
        buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl RenderStream for MockRenderStream {
    fn is_terminal(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_line_stream_should_replay_then_end() {
        let mut stream = MockLineStream::new(["login alice secret"]);
        stream.push_line("quit");
        assert_eq!(stream.read_line().unwrap().as_deref(), Some("login alice secret"));
        assert_eq!(stream.read_line().unwrap().as_deref(), Some("quit"));
        assert_eq!(stream.read_line().unwrap(), None);
    }

    #[test]
    fn mock_render_stream_clones_should_share_output() {
        let captured = MockRenderStream::new();
        let mut writer = captured.clone();
        write!(writer, "hello").unwrap();
        assert_eq!(captured.contents(), "hello");
        assert!(!writer.is_terminal());
    }
}
