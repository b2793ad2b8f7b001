//! Configuration constants and utilities for flixline
//!
//! Profiles live in an INI file, one section per profile:
//!
//! ```ini
//! [default]
//! api_url = https://myflix-api-project.herokuapp.com/
//! session_file = ~/.flixline/session
//! ```

use anyhow::{Context, Result};
use ini::Ini;
use std::path::PathBuf;

use crate::api::DEFAULT_API_URL;

/// Default profile file path for flixline
pub const DEFAULT_PROFILE_PATH: &str = "~/.flixline/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "FLIXLINE_PROFILE_PATH";

/// Default session file path
pub const DEFAULT_SESSION_PATH: &str = "~/.flixline/session";

/// Environment variable name for overriding the session file path
pub const SESSION_PATH_ENV_VAR: &str = "FLIXLINE_SESSION_PATH";

/// Environment variable holding the log filter
pub const LOG_LEVEL_ENV_VAR: &str = "FLIXLINE_LOG_LEVEL";

const API_URL_KEY: &str = "api_url";
const SESSION_FILE_KEY: &str = "session_file";

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    env_or(PROFILE_PATH_ENV_VAR, DEFAULT_PROFILE_PATH)
}

/// Session file path when the profile does not name one
pub fn get_session_path() -> String {
    env_or(SESSION_PATH_ENV_VAR, DEFAULT_SESSION_PATH)
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var_os(var)
        .and_then(|val| val.into_string().ok())
        .filter(|val| !val.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Connection settings selected by a profile name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppProfile {
    pub api_url: String,
    pub session_file: String,
}

impl Default for AppProfile {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_file: get_session_path(),
        }
    }
}

/// Read-only access to the profile INI file
#[derive(Debug, Clone)]
pub struct IniProfileStore {
    path: PathBuf,
}

impl IniProfileStore {
    pub fn new(path: &str) -> Self {
        Self {
            path: PathBuf::from(shellexpand::tilde(path).into_owned()),
        }
    }

    /// Look up `name`. `None` when the file or the section does not exist.
    pub fn get_profile(&self, name: &str) -> Result<Option<AppProfile>> {
        if !self.path.exists() {
            tracing::debug!("Profile file {} not found", self.path.display());
            return Ok(None);
        }
        let ini = Ini::load_from_file(&self.path)
            .with_context(|| format!("Failed to read profile file {}", self.path.display()))?;

        let Some(section) = ini.section(Some(name)) else {
            return Ok(None);
        };

        let defaults = AppProfile::default();
        Ok(Some(AppProfile {
            api_url: section
                .get(API_URL_KEY)
                .map(str::to_string)
                .unwrap_or(defaults.api_url),
            session_file: section
                .get(SESSION_FILE_KEY)
                .map(str::to_string)
                .unwrap_or(defaults.session_file),
        }))
    }

    /// Like `get_profile`, falling back to the built-in default profile
    pub fn get_profile_or_default(&self, name: &str) -> Result<AppProfile> {
        Ok(match self.get_profile(name)? {
            Some(profile) => {
                tracing::debug!("Profile '{}' loaded, api_url: {}", name, profile.api_url);
                profile
            }
            None => {
                tracing::debug!("Profile '{}' not found, using default profile", name);
                AppProfile::default()
            }
        })
    }
}
