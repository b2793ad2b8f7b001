//! # Auth View-Models
//!
//! Registration and login forms. The server is the only judge of validity;
//! the forms check nothing beyond the presence of required fields.

use crate::api::{ApiClient, Credentials, Registration};
use crate::repl::events::{Form, ModelEvent, PendingEvents, Route, ViewEvent};
use crate::repl::models::Notification;
use crate::session::SessionContext;

/// First required field left blank, as a user-facing message
fn missing_field(fields: &[(&str, &str)]) -> Option<String> {
    fields
        .iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| format!("{name} is required"))
}

pub struct RegistrationViewModel {
    api: ApiClient,
    form: Registration,
    open: bool,
    events: PendingEvents,
}

impl RegistrationViewModel {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            form: Registration::default(),
            open: false,
            events: PendingEvents::new(),
        }
    }

    /// Open the form with the given field values
    pub fn open(&mut self, form: Registration) {
        self.form = form;
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn events_mut(&mut self) -> &mut PendingEvents {
        &mut self.events
    }

    /// Submit the form verbatim. Returns whether the account was created.
    pub async fn submit(&mut self) -> bool {
        if let Some(message) = missing_field(&[
            ("Username", self.form.username.as_str()),
            ("Password", self.form.password.as_str()),
            ("Email", self.form.email.as_str()),
        ]) {
            self.events.notify(Notification::failure(message));
            return false;
        }

        match self.api.register(&self.form).await {
            Ok(user) => {
                tracing::info!("Registered '{}'", user.username);
                self.open = false;
                self.events.emit_model(ModelEvent::UserRegistered {
                    username: user.username,
                });
                self.events
                    .emit_view(ViewEvent::FormClosed(Form::Registration));
                self.events
                    .notify(Notification::info("User registration successful"));
                true
            }
            Err(e) => {
                self.events.notify(Notification::failure(e.to_string()));
                false
            }
        }
    }
}

pub struct LoginViewModel {
    api: ApiClient,
    session: SessionContext,
    form: Credentials,
    open: bool,
    events: PendingEvents,
}

impl LoginViewModel {
    pub fn new(api: ApiClient, session: SessionContext) -> Self {
        Self {
            api,
            session,
            form: Credentials::default(),
            open: false,
            events: PendingEvents::new(),
        }
    }

    pub fn open(&mut self, credentials: Credentials) {
        self.form = credentials;
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn events_mut(&mut self) -> &mut PendingEvents {
        &mut self.events
    }

    /// Submit the credentials; on success start the session and go to the catalog
    pub async fn submit(&mut self) -> bool {
        if let Some(message) = missing_field(&[
            ("Username", self.form.username.as_str()),
            ("Password", self.form.password.as_str()),
        ]) {
            self.events.notify(Notification::failure(message));
            return false;
        }

        let response = match self.api.login(&self.form).await {
            Ok(response) => response,
            Err(e) => {
                self.events.notify(Notification::failure(e.to_string()));
                return false;
            }
        };

        if let Err(e) = self
            .session
            .begin(&response.token, &response.user.username)
        {
            tracing::error!("Failed to store session: {e:#}");
            self.events.notify(Notification::failure(format!("{e}")));
            return false;
        }
        if let Err(e) = self.session.cache_user(&response.user) {
            tracing::warn!("Failed to cache profile: {e:#}");
        }

        self.open = false;
        self.form.password.clear();
        self.events.emit_model(ModelEvent::SessionStarted {
            username: response.user.username,
        });
        self.events.emit_view(ViewEvent::FormClosed(Form::Login));
        self.events
            .notify(Notification::info("Logged In Successfully"));
        self.events.emit_view(ViewEvent::NavigateTo(Route::Movies));
        true
    }
}
