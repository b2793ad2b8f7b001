//! # Session Context
//!
//! Explicit, injectable handle to the authenticated session. Every component
//! that needs the token or username receives a clone of the same context;
//! `begin()` marks the start of a session (login) and `end()` its teardown
//! (logout or account deletion).

use crate::api::User;
use crate::session::store::{Session, SessionStore};
use anyhow::Result;
use std::sync::{Arc, Mutex, MutexGuard};

struct SessionState {
    store: Box<dyn SessionStore>,
    session: Option<Session>,
    user: Option<User>,
}

/// Shared session handle; clones observe the same session
#[derive(Clone)]
pub struct SessionContext {
    state: Arc<Mutex<SessionState>>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("SessionContext")
            .field(
                "username",
                &state.session.as_ref().map(|s| s.username.as_str()),
            )
            .field("authenticated", &state.session.is_some())
            .finish()
    }
}

impl SessionContext {
    /// Build a context over `store`, picking up any session persisted earlier
    pub fn restore(store: impl SessionStore + 'static) -> Result<Self> {
        let session = store.get()?;
        let user = match &session {
            Some(_) => store.cached_user()?,
            None => None,
        };

        match &session {
            Some(s) => tracing::info!("Restored session for '{}'", s.username),
            None => tracing::debug!("No persisted session"),
        }

        Ok(Self {
            state: Arc::new(Mutex::new(SessionState {
                store: Box::new(store),
                session,
                user,
            })),
        })
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        // State stays consistent across a panic: every mutation is a single assignment.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start a session after a successful login
    pub fn begin(&self, token: &str, username: &str) -> Result<()> {
        let mut state = self.lock();
        let session = Session::new(token, username);
        state.store.set(&session)?;
        state.session = Some(session);
        state.user = None;
        tracing::info!("Session started for '{}'", username);
        Ok(())
    }

    /// Tear the session down and clear every persisted key. The in-memory
    /// session is dropped only once the store has been cleared.
    pub fn end(&self) -> Result<()> {
        let mut state = self.lock();
        state.store.clear()?;
        state.session = None;
        state.user = None;
        tracing::info!("Session ended");
        Ok(())
    }

    pub fn current(&self) -> Option<Session> {
        self.lock().session.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().session.is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.lock().session.as_ref().map(|s| s.token.clone())
    }

    pub fn username(&self) -> Option<String> {
        self.lock().session.as_ref().map(|s| s.username.clone())
    }

    /// Point the session at a new username, keeping the token
    pub fn rename(&self, username: &str) -> Result<()> {
        let mut state = self.lock();
        let Some(mut session) = state.session.clone() else {
            return Ok(());
        };
        session.username = username.to_string();
        state.store.set(&session)?;
        state.session = Some(session);
        Ok(())
    }

    /// Cache the last successfully fetched profile
    pub fn cache_user(&self, user: &User) -> Result<()> {
        let mut state = self.lock();
        state.store.cache_user(user)?;
        state.user = Some(user.clone());
        Ok(())
    }

    pub fn cached_user(&self) -> Option<User> {
        self.lock().user.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::store::{IniSessionStore, MemorySessionStore, StuckSessionStore};
    use tempfile::TempDir;

    fn user(name: &str) -> User {
        User {
            username: name.to_string(),
            email: format!("{name}@example.com"),
            ..User::default()
        }
    }

    #[test]
    fn context_should_start_unauthenticated_on_empty_store() {
        let context = SessionContext::restore(MemorySessionStore::new()).unwrap();
        assert!(!context.is_authenticated());
        assert_eq!(context.token(), None);
        assert_eq!(context.username(), None);
    }

    #[test]
    fn begin_and_end_should_bound_the_session() {
        let context = SessionContext::restore(MemorySessionStore::new()).unwrap();

        context.begin("jwt", "alice").unwrap();
        assert_eq!(context.current(), Some(Session::new("jwt", "alice")));
        assert_eq!(context.token().as_deref(), Some("jwt"));

        context.cache_user(&user("alice")).unwrap();
        assert_eq!(context.cached_user(), Some(user("alice")));

        context.end().unwrap();
        assert_eq!(context.current(), None);
        assert_eq!(context.cached_user(), None);
    }

    #[test]
    fn clones_should_share_the_session() {
        let context = SessionContext::restore(MemorySessionStore::new()).unwrap();
        let other = context.clone();

        context.begin("jwt", "alice").unwrap();
        assert_eq!(other.username().as_deref(), Some("alice"));

        other.end().unwrap();
        assert!(!context.is_authenticated());
    }

    #[test]
    fn restore_should_pick_up_persisted_session() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session");
        let path = path.to_str().unwrap();

        let context = SessionContext::restore(IniSessionStore::new(path)).unwrap();
        context.begin("jwt", "alice").unwrap();
        context.cache_user(&user("alice")).unwrap();
        drop(context);

        let restored = SessionContext::restore(IniSessionStore::new(path)).unwrap();
        assert_eq!(restored.current(), Some(Session::new("jwt", "alice")));
        assert_eq!(
            restored.cached_user().map(|u| u.email),
            Some("alice@example.com".to_string())
        );

        restored.end().unwrap();
        let after_logout = SessionContext::restore(IniSessionStore::new(path)).unwrap();
        assert!(!after_logout.is_authenticated());
    }

    #[test]
    fn failed_end_should_keep_the_session() {
        let context = SessionContext::restore(StuckSessionStore::default()).unwrap();
        context.begin("jwt", "alice").unwrap();
        context.cache_user(&user("alice")).unwrap();

        assert!(context.end().is_err());
        assert_eq!(context.current(), Some(Session::new("jwt", "alice")));
        assert_eq!(context.cached_user(), Some(user("alice")));
    }

    #[test]
    fn rename_should_keep_token_and_persist() {
        let context = SessionContext::restore(MemorySessionStore::new()).unwrap();
        context.rename("ignored").unwrap();
        assert_eq!(context.current(), None);

        context.begin("jwt", "alice").unwrap();
        context.rename("alice2").unwrap();
        assert_eq!(context.current(), Some(Session::new("jwt", "alice2")));
    }
}
