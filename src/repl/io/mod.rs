//! # I/O Abstraction Layer
//!
//! Trait abstractions for the input and output streams of the REPL, so the
//! controller can be driven by a script in tests.
//!
//! ## Architecture
//!
//! ```text
//! Production:  AppController ──▶ TerminalLineStream   ──▶ stdin
//!                            ──▶ TerminalRenderStream ──▶ stdout
//!
//! Testing:     AppController ──▶ MockLineStream       ──▶ VecDeque<String>
//!                            ──▶ MockRenderStream     ──▶ Arc<Mutex<Vec<u8>>>
//! ```

use anyhow::Result;
use std::io::Write;

pub mod mock;
pub mod terminal;

pub use mock::{MockLineStream, MockRenderStream};
pub use terminal::{TerminalLineStream, TerminalRenderStream};

/// Input line source
///
/// Lines are read between requests, never while one is in flight, so a
/// blocking implementation is acceptable.
pub trait LineStream: Send {
    /// Read the next line without its terminator. `None` means end of input.
    fn read_line(&mut self) -> Result<Option<String>>;
}

/// Output render stream abstraction
pub trait RenderStream: Write + Send {
    /// Whether the output is an interactive terminal (enables colour)
    fn is_terminal(&self) -> bool;
}
