//! # Status Line Model
//!
//! Encapsulates the state shown around the prompt: where the user is, who is
//! signed in and the most recent notification.

use super::notification::Notification;
use crate::repl::events::Route;
use std::time::Instant;

/// Status line model containing all prompt/status display state
#[derive(Debug, Clone)]
pub struct StatusLine {
    /// Current top-level view
    route: Route,

    /// Signed-in username, if any
    username: Option<String>,

    /// Profile name the client was started with
    profile_name: String,

    /// Most recent notification and when it was posted
    notification: Option<(Notification, Instant)>,
}

impl StatusLine {
    pub fn new(profile_name: impl Into<String>) -> Self {
        Self {
            route: Route::Welcome,
            username: None,
            profile_name: profile_name.into(),
            notification: None,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn set_route(&mut self, route: Route) {
        self.route = route;
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    pub fn set_notification(&mut self, notification: Notification) {
        self.notification = Some((notification, Instant::now()));
    }

    /// The latest notification while it has not yet expired at `now`
    pub fn active_notification(&self, now: Instant) -> Option<&Notification> {
        self.notification
            .as_ref()
            .filter(|(n, posted)| now.saturating_duration_since(*posted) < n.duration())
            .map(|(n, _)| n)
    }

    /// The latest notification regardless of age
    pub fn last_notification(&self) -> Option<&Notification> {
        self.notification.as_ref().map(|(n, _)| n)
    }

    /// Prompt text, e.g. `flixline:movies alice> `
    pub fn prompt(&self) -> String {
        match &self.username {
            Some(name) => format!("flixline:{} {}> ", self.route, name),
            None => format!("flixline:{}> ", self.route),
        }
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new("default")
    }
}
