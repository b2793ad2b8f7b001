//! # Commands
//!
//! Turn typed lines into `CommandEvent`s. Commands never touch view-models
//! directly; the controller applies the events they produce.

pub mod context;
pub mod events;
pub mod ex_commands;

pub use context::CommandContext;
pub use events::CommandEvent;
pub use ex_commands::{tokenize, ExCommand, ExCommandRegistry};
