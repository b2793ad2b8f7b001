//! # Profile View-Model
//!
//! Loads, edits and deletes the signed-in user's account record. The local
//! copy is replaced wholesale on every successful read; edits go out as a
//! full replacement record and are never patched in locally.

use crate::api::{ApiClient, ApiError, User, UserUpdate};
use crate::repl::events::{ModelEvent, PendingEvents, Route, ViewEvent};
use crate::repl::models::Notification;
use crate::repl::view_models::scope::ViewScope;
use crate::session::SessionContext;

const PROFILE_NOTIFICATION_MS: u64 = 3000;

/// Fields the user asked to change; absent fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<String>,
}

impl ProfileForm {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.password.is_none()
            && self.email.is_none()
            && self.birthday.is_none()
    }

    /// Build the full replacement payload on top of `current`
    pub fn to_update(&self, current: &User) -> Option<UserUpdate> {
        let password = self.password.clone().filter(|p| !p.is_empty())?;
        Some(UserUpdate {
            username: self
                .username
                .clone()
                .unwrap_or_else(|| current.username.clone()),
            password,
            email: self.email.clone().unwrap_or_else(|| current.email.clone()),
            birthday: self.birthday.clone().or_else(|| current.birthday.clone()),
        })
    }
}

pub struct ProfileViewModel {
    api: ApiClient,
    session: SessionContext,
    scope: ViewScope,
    user: Option<User>,
    events: PendingEvents,
}

impl ProfileViewModel {
    pub fn new(api: ApiClient, session: SessionContext) -> Self {
        Self {
            api,
            session,
            scope: ViewScope::new(),
            user: None,
            events: PendingEvents::new(),
        }
    }

    pub fn teardown(&self) {
        self.scope.close();
    }

    /// Last successfully fetched record
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn events_mut(&mut self) -> &mut PendingEvents {
        &mut self.events
    }

    /// Fetch the user record and replace the local copy
    pub async fn load(&mut self) {
        if self.user.is_none() {
            self.user = self.session.cached_user();
        }

        let token = self.session.token();
        let username = self.session.username().unwrap_or_default();
        let api = &self.api;

        let Some(result) = self
            .scope
            .guard(api.get_user(token.as_deref(), &username))
            .await
        else {
            return;
        };

        match result {
            Ok(user) => {
                if let Err(e) = self.session.cache_user(&user) {
                    tracing::warn!("Failed to cache profile: {e:#}");
                }
                self.events.emit_model(ModelEvent::UserLoaded {
                    username: user.username.clone(),
                });
                self.user = Some(user);
                self.events.emit_view(ViewEvent::ContentChanged);
            }
            Err(e) => self.notify_failure(&e),
        }
    }

    /// Send a full replacement record built from `form` and the current copy
    pub async fn edit(&mut self, form: &ProfileForm) {
        let Some(current) = self.user.clone().or_else(|| self.session.cached_user()) else {
            self.events
                .notify(Notification::failure("Profile is not loaded yet"));
            return;
        };
        let Some(update) = form.to_update(&current) else {
            self.events.notify(Notification::failure(
                "Password is required to update your profile",
            ));
            return;
        };

        let token = self.session.token();
        let old_username = self.session.username().unwrap_or_default();
        let api = &self.api;

        let Some(result) = self
            .scope
            .guard(api.edit_user(token.as_deref(), &old_username, &update))
            .await
        else {
            return;
        };

        match result {
            Ok(user) => {
                if user.username != old_username {
                    if let Err(e) = self.session.rename(&user.username) {
                        tracing::warn!("Failed to persist renamed session: {e:#}");
                    }
                }
                if let Err(e) = self.session.cache_user(&user) {
                    tracing::warn!("Failed to cache profile: {e:#}");
                }
                self.events.emit_model(ModelEvent::ProfileUpdated {
                    username: user.username.clone(),
                });
                self.user = Some(user);
                self.events.notify(
                    Notification::info("Your profile was updated successfully")
                        .with_duration_ms(PROFILE_NOTIFICATION_MS),
                );
                self.events.emit_view(ViewEvent::ReloadRequired);
            }
            Err(e) => self.notify_failure(&e),
        }
    }

    /// Delete the account on the server. Does nothing unless `confirmed`.
    pub async fn delete_account(&mut self, confirmed: bool) {
        if !confirmed {
            tracing::debug!("Account deletion not confirmed");
            return;
        }

        let token = self.session.token();
        let username = self.session.username().unwrap_or_default();
        let api = &self.api;

        let Some(result) = self
            .scope
            .guard(api.delete_user(token.as_deref(), &username))
            .await
        else {
            return;
        };

        match result {
            Ok(()) => {
                self.user = None;
                self.events.emit_model(ModelEvent::AccountDeleted {
                    username: username.clone(),
                });
                match self.session.end() {
                    Ok(()) => self.events.emit_model(ModelEvent::SessionEnded),
                    Err(e) => {
                        tracing::error!("Account deleted but session not cleared: {e:#}");
                        self.events.notify(Notification::failure(format!("{e}")));
                    }
                }
                self.events.notify(
                    Notification::info(format!("{username} has successfully been deleted"))
                        .with_duration_ms(PROFILE_NOTIFICATION_MS),
                );
                self.events.emit_view(ViewEvent::NavigateTo(Route::Welcome));
            }
            Err(e) => self.notify_failure(&e),
        }
    }

    fn notify_failure(&mut self, error: &ApiError) {
        self.events.notify(Notification::failure(error.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn signed_in() -> SessionContext {
        let session = SessionContext::restore(MemorySessionStore::new()).unwrap();
        session.begin("tok", "alice").unwrap();
        session
    }

    fn alice_json() -> serde_json::Value {
        json!({
            "Username": "alice",
            "Email": "alice@example.com",
            "Birthday": "1990-01-01",
            "FavoriteMovies": ["m1"]
        })
    }

    #[test]
    fn form_should_fill_missing_fields_from_current_record() {
        let current = User {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            birthday: Some("1990-01-01".to_string()),
            ..User::default()
        };
        let form = ProfileForm {
            email: Some("new@example.com".to_string()),
            password: Some("secret".to_string()),
            ..ProfileForm::default()
        };

        let update = form.to_update(&current).unwrap();
        assert_eq!(update.username, "alice");
        assert_eq!(update.email, "new@example.com");
        assert_eq!(update.birthday.as_deref(), Some("1990-01-01"));

        let without_password = ProfileForm {
            email: Some("x@example.com".to_string()),
            ..ProfileForm::default()
        };
        assert!(without_password.to_update(&current).is_none());
        assert!(ProfileForm::default().is_empty());
    }

    #[tokio::test]
    async fn load_should_replace_user_and_cache_it() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/alice"))
            .respond_with(ResponseTemplate::new(200).set_body_json(alice_json()))
            .mount(&server)
            .await;

        let session = signed_in();
        let mut vm = ProfileViewModel::new(ApiClient::new(&server.uri()).unwrap(), session.clone());
        vm.load().await;

        assert_eq!(vm.user().unwrap().email, "alice@example.com");
        assert_eq!(session.cached_user().unwrap().username, "alice");
    }

    #[tokio::test]
    async fn edit_should_send_full_record_and_request_reload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/alice"))
            .respond_with(ResponseTemplate::new(200).set_body_json(alice_json()))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/users/alice"))
            .and(body_json(json!({
                "Username": "alice2",
                "Password": "secret",
                "Email": "alice@example.com",
                "Birthday": "1990-01-01"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Username": "alice2",
                "Email": "alice@example.com",
                "Birthday": "1990-01-01",
                "FavoriteMovies": ["m1"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = signed_in();
        let mut vm = ProfileViewModel::new(ApiClient::new(&server.uri()).unwrap(), session.clone());
        vm.load().await;
        vm.events_mut().drain();

        vm.edit(&ProfileForm {
            username: Some("alice2".to_string()),
            password: Some("secret".to_string()),
            ..ProfileForm::default()
        })
        .await;

        assert_eq!(vm.user().unwrap().username, "alice2");
        assert_eq!(session.username().as_deref(), Some("alice2"));
        assert_eq!(session.token().as_deref(), Some("tok"));
        let (view, _) = vm.events_mut().drain();
        assert!(view.contains(&ViewEvent::ReloadRequired));
    }

    #[tokio::test]
    async fn delete_without_confirmation_should_not_call_the_server() {
        let server = MockServer::start().await;
        let session = signed_in();
        let mut vm = ProfileViewModel::new(ApiClient::new(&server.uri()).unwrap(), session.clone());

        vm.delete_account(false).await;

        assert!(session.is_authenticated());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_should_end_session_and_go_to_welcome() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/users/alice"))
            .respond_with(ResponseTemplate::new(200).set_body_string("alice was deleted."))
            .expect(1)
            .mount(&server)
            .await;

        let session = signed_in();
        let mut vm = ProfileViewModel::new(ApiClient::new(&server.uri()).unwrap(), session.clone());
        vm.delete_account(true).await;

        assert!(!session.is_authenticated());
        let (view, model) = vm.events_mut().drain();
        assert!(view.contains(&ViewEvent::NavigateTo(Route::Welcome)));
        assert!(model.contains(&ModelEvent::AccountDeleted {
            username: "alice".to_string()
        }));
    }

    #[tokio::test]
    async fn failed_delete_should_keep_session() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/users/alice"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let session = signed_in();
        let mut vm = ProfileViewModel::new(ApiClient::new(&server.uri()).unwrap(), session.clone());
        vm.delete_account(true).await;

        assert!(session.is_authenticated());
        let (view, _) = vm.events_mut().drain();
        assert!(matches!(&view[..], [ViewEvent::Notify(n)] if n.is_failure()));
    }
}
