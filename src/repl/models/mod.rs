//! # Models
//!
//! Plain UI state that is not owned by a single view-model.

pub mod notification;
pub mod status_line;

pub use notification::{Notification, NotificationKind, DEFAULT_NOTIFICATION_MS};
pub use status_line::StatusLine;
