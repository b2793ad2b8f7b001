//! # Command Context
//!
//! Read-only snapshot of application state handed to commands.

use crate::repl::events::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandContext {
    pub route: Route,
    pub authenticated: bool,
}

impl CommandContext {
    pub fn new(route: Route, authenticated: bool) -> Self {
        Self {
            route,
            authenticated,
        }
    }
}

impl Default for CommandContext {
    fn default() -> Self {
        Self::new(Route::Welcome, false)
    }
}
