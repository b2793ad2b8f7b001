//! # Session Store
//!
//! Persistent key/value storage for the authenticated session and the cached
//! profile. The INI-backed store survives restarts the way the browser's local
//! storage survives page reloads; `clear()` removes every key.
//!
//! INI values are written as JSON literals so quotes, backslashes and
//! surrounding whitespace come back unchanged; the INI parser would otherwise
//! strip them.

use crate::api::User;
use anyhow::{Context, Result};
use ini::{EscapePolicy, Ini, ParseOption};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

const SESSION_SECTION: &str = "session";
const USER_SECTION: &str = "user";
const TOKEN_KEY: &str = "token";
const USERNAME_KEY: &str = "username";
const EMAIL_KEY: &str = "email";
const BIRTHDAY_KEY: &str = "birthday";
const FAVORITES_KEY: &str = "favorites";
const ID_KEY: &str = "id";

/// Proof of authentication held by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub username: String,
}

impl Session {
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
        }
    }
}

/// Backing storage for [`crate::session::SessionContext`]
pub trait SessionStore: Send {
    /// Read the persisted session, if any
    fn get(&self) -> Result<Option<Session>>;

    /// Persist the session, replacing any previous one
    fn set(&mut self, session: &Session) -> Result<()>;

    /// Read the cached profile of the last successful user fetch
    fn cached_user(&self) -> Result<Option<User>>;

    /// Replace the cached profile
    fn cache_user(&mut self, user: &User) -> Result<()>;

    /// Remove every persisted key
    fn clear(&mut self) -> Result<()>;
}

/// In-process store; nothing survives the process
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    session: Option<Session>,
    user: Option<User>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<Session>> {
        Ok(self.session.clone())
    }

    fn set(&mut self, session: &Session) -> Result<()> {
        self.session = Some(session.clone());
        Ok(())
    }

    fn cached_user(&self) -> Result<Option<User>> {
        Ok(self.user.clone())
    }

    fn cache_user(&mut self, user: &User) -> Result<()> {
        self.user = Some(user.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.session = None;
        self.user = None;
        Ok(())
    }
}

/// Memory store whose `clear()` always fails
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct StuckSessionStore {
    inner: MemorySessionStore,
}

#[cfg(test)]
impl SessionStore for StuckSessionStore {
    fn get(&self) -> Result<Option<Session>> {
        self.inner.get()
    }

    fn set(&mut self, session: &Session) -> Result<()> {
        self.inner.set(session)
    }

    fn cached_user(&self) -> Result<Option<User>> {
        self.inner.cached_user()
    }

    fn cache_user(&mut self, user: &User) -> Result<()> {
        self.inner.cache_user(user)
    }

    fn clear(&mut self) -> Result<()> {
        anyhow::bail!("Failed to remove session file: read-only file system")
    }
}

/// Session persisted as an INI file
///
/// ```text
/// [session]
/// token="..."
/// username="alice"
///
/// [user]
/// username="alice"
/// email="alice@example.com"
/// favorites=["m1","m2"]
/// ```
#[derive(Debug, Clone)]
pub struct IniSessionStore {
    path: PathBuf,
}

impl IniSessionStore {
    /// Create a store at `path`; a leading `~` is expanded
    pub fn new(path: &str) -> Self {
        let expanded = shellexpand::tilde(path).into_owned();
        Self {
            path: PathBuf::from(expanded),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Ini> {
        if !self.path.exists() {
            return Ok(Ini::new());
        }
        let raw = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        Ini::load_from_file_opt(&self.path, raw)
            .with_context(|| format!("Failed to read session file {}", self.path.display()))
    }

    fn save(&self, ini: &Ini) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create session directory {}", parent.display())
                })?;
            }
        }
        ini.write_to_file_policy(&self.path, EscapePolicy::Nothing)
            .with_context(|| format!("Failed to write session file {}", self.path.display()))
    }
}

impl SessionStore for IniSessionStore {
    fn get(&self) -> Result<Option<Session>> {
        let ini = self.load()?;
        let token = ini.get_from(Some(SESSION_SECTION), TOKEN_KEY).map(decode);
        let username = ini.get_from(Some(SESSION_SECTION), USERNAME_KEY).map(decode);

        Ok(match (token, username) {
            (Some(token), Some(username)) if !token.is_empty() => {
                Some(Session::new(token, username))
            }
            _ => None,
        })
    }

    fn set(&mut self, session: &Session) -> Result<()> {
        let mut ini = self.load()?;
        ini.with_section(Some(SESSION_SECTION))
            .set(TOKEN_KEY, encode(&session.token))
            .set(USERNAME_KEY, encode(&session.username));
        self.save(&ini)?;
        tracing::debug!("Session persisted to {}", self.path.display());
        Ok(())
    }

    fn cached_user(&self) -> Result<Option<User>> {
        let ini = self.load()?;
        let Some(section) = ini.section(Some(USER_SECTION)) else {
            return Ok(None);
        };
        let Some(username) = section.get(USERNAME_KEY) else {
            return Ok(None);
        };

        let favorite_movie_ids = section
            .get(FAVORITES_KEY)
            .map(decode_favorites)
            .unwrap_or_default();

        Ok(Some(User {
            id: section.get(ID_KEY).map(decode),
            username: decode(username),
            email: section.get(EMAIL_KEY).map(decode).unwrap_or_default(),
            birthday: section.get(BIRTHDAY_KEY).map(decode),
            favorite_movie_ids,
        }))
    }

    fn cache_user(&mut self, user: &User) -> Result<()> {
        let mut ini = self.load()?;
        ini.delete(Some(USER_SECTION));

        let favorites = serde_json::to_string(&user.favorite_movie_ids)
            .context("Failed to encode cached favorites")?;

        let mut section = ini.with_section(Some(USER_SECTION));
        section
            .set(USERNAME_KEY, encode(&user.username))
            .set(EMAIL_KEY, encode(&user.email))
            .set(FAVORITES_KEY, favorites);
        if let Some(id) = &user.id {
            section.set(ID_KEY, encode(id));
        }
        if let Some(birthday) = &user.birthday {
            section.set(BIRTHDAY_KEY, encode(birthday));
        }

        self.save(&ini)
    }

    fn clear(&mut self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).with_context(|| {
                format!("Failed to remove session file {}", self.path.display())
            })?;
            tracing::debug!("Session file {} removed", self.path.display());
        }
        Ok(())
    }
}

/// Quote `value` as a JSON string literal
fn encode(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

/// Reverse of [`encode`]; a hand-edited bare value is taken as written
fn decode(raw: &str) -> String {
    serde_json::from_str(raw).unwrap_or_else(|_| raw.to_string())
}

/// Favorites are a JSON array; a bare comma list is also accepted
fn decode_favorites(raw: &str) -> BTreeSet<String> {
    serde_json::from_str(raw).unwrap_or_else(|_| {
        raw.split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    })
}
