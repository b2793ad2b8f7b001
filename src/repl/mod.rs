//! # MVVM Architecture Implementation
//!
//! The interactive side of flixline. View-models own UI-facing state and talk
//! to the API client; the controller maps typed commands onto them and hands
//! the results to the renderer.

pub mod commands;
pub mod controllers;
pub mod events;
pub mod io;
pub mod models;
pub mod view_models;
pub mod views;

// Re-export core types
pub use controllers::AppController;
pub use events::{ModelEvent, PendingEvents, Route, ViewEvent};
pub use models::{Notification, NotificationKind, StatusLine};
pub use view_models::*;

// Re-export specific items from commands to avoid conflicts
pub use commands::{CommandContext, CommandEvent, ExCommand, ExCommandRegistry};
