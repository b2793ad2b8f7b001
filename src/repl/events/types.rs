//! # Event Types
//!
//! Small value types shared by model and view events.

use std::fmt;

/// Top-level screens of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    /// Unauthenticated landing view
    #[default]
    Welcome,
    /// Full movie catalog
    Movies,
    /// Movies in the user's favorites list
    Favorites,
    /// Account record of the signed-in user
    Profile,
}

impl Route {
    /// Whether the route may only be shown while a session exists
    pub fn requires_session(self) -> bool {
        !matches!(self, Route::Welcome)
    }

    /// Whether the route is backed by the catalog view-model
    pub fn is_catalog(self) -> bool {
        matches!(self, Route::Movies | Route::Favorites)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Route::Welcome => "welcome",
            Route::Movies => "movies",
            Route::Favorites => "favorites",
            Route::Profile => "profile",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Modal forms shown on the welcome view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    Login,
    Registration,
}
