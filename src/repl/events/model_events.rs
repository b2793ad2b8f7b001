//! # Model Events
//!
//! Events emitted when client-side state changes after a server round trip.
//! They describe what happened; the controller publishes them on the event bus.

/// Events emitted when models change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelEvent {
    /// Movie list replaced by a fresh fetch
    MoviesLoaded { count: usize },

    /// User record replaced by a fresh fetch
    UserLoaded { username: String },

    /// Server confirmed a favorite was added
    FavoriteAdded { movie_id: String },

    /// Server confirmed a favorite was removed
    FavoriteRemoved { movie_id: String },

    /// New account created
    UserRegistered { username: String },

    /// Login succeeded and the session was stored
    SessionStarted { username: String },

    /// Session cleared
    SessionEnded,

    /// Profile edit accepted by the server
    ProfileUpdated { username: String },

    /// Account removed on the server
    AccountDeleted { username: String },
}
