//! # Views Module
//!
//! Contains all view-related components for rendering the REPL output.

pub mod ansi_escape_codes;
pub mod terminal_renderer;

pub use terminal_renderer::TerminalRenderer;
