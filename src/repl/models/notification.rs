//! # Notifications
//!
//! Transient user-facing messages, the terminal counterpart of a snackbar.

use std::time::Duration;

/// How long a notification stays current unless overridden
pub const DEFAULT_NOTIFICATION_MS: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Failure,
}

/// A transient message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    message: String,
    kind: NotificationKind,
    duration: Duration,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Info,
            duration: Duration::from_millis(DEFAULT_NOTIFICATION_MS),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Failure,
            duration: Duration::from_millis(DEFAULT_NOTIFICATION_MS),
        }
    }

    pub fn with_duration_ms(mut self, millis: u64) -> Self {
        self.duration = Duration::from_millis(millis);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn is_failure(&self) -> bool {
        self.kind == NotificationKind::Failure
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_should_default_to_two_seconds() {
        let n = Notification::info("Logged In Successfully");
        assert_eq!(n.duration(), Duration::from_millis(2000));
        assert!(!n.is_failure());

        let n = Notification::failure("oops").with_duration_ms(3000);
        assert_eq!(n.duration(), Duration::from_secs(3));
        assert_eq!(n.kind(), NotificationKind::Failure);
    }
}
