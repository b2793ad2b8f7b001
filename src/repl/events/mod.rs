//! # Events Module
//!
//! Model events describe state that changed after a server round trip; view
//! events tell the controller what the screen should do next. View-models
//! queue both in [`PendingEvents`] and the controller drains them after every
//! command, publishing the model events on the [`ModelEventBus`].

pub mod event_bus;
pub mod model_events;
pub mod types;
pub mod view_events;

pub use event_bus::{ModelEventBus, Subscriber};
pub use model_events::ModelEvent;
pub use types::{Form, Route};
pub use view_events::ViewEvent;

use crate::repl::models::Notification;

/// Events queued by a view-model until the controller collects them
#[derive(Debug, Default)]
pub struct PendingEvents {
    view: Vec<ViewEvent>,
    model: Vec<ModelEvent>,
}

impl PendingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit_view(&mut self, event: ViewEvent) {
        self.view.push(event);
    }

    pub fn emit_model(&mut self, event: ModelEvent) {
        self.model.push(event);
    }

    /// Queue a transient notification
    pub fn notify(&mut self, notification: Notification) {
        tracing::debug!("notify: {}", notification.message());
        self.view.push(ViewEvent::Notify(notification));
    }

    /// Take everything queued so far
    pub fn drain(&mut self) -> (Vec<ViewEvent>, Vec<ModelEvent>) {
        (
            std::mem::take(&mut self.view),
            std::mem::take(&mut self.model),
        )
    }

    pub fn view_events(&self) -> &[ViewEvent] {
        &self.view
    }

    pub fn model_events(&self) -> &[ModelEvent] {
        &self.model
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty() && self.model.is_empty()
    }
}
