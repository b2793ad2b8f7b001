//! # View Events
//!
//! Events emitted by view-models that tell the controller what the screen
//! should do next.

use super::types::{Form, Route};
use crate::repl::models::Notification;

/// Events emitted when view updates are needed
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// Show a transient message to the user
    Notify(Notification),

    /// Switch to another top-level view
    NavigateTo(Route),

    /// A modal form finished and should close
    FormClosed(Form),

    /// Dependent views must reload from the server
    ReloadRequired,

    /// The current view's content changed and should be redrawn
    ContentChanged,
}
