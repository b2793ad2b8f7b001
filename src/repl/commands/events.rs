//! # Command Events
//!
//! Events produced by commands that describe what should happen.
//! Commands produce these events, and the controller applies them to the
//! view-models. Commands suggest, the controller decides.

use crate::api::{Credentials, Registration};
use crate::repl::events::Route;
use crate::repl::view_models::ProfileForm;

/// Events that commands can produce to request changes
#[derive(Debug, Clone, PartialEq)]
pub enum CommandEvent {
    /// Submit the registration form
    RegisterRequested(Registration),

    /// Submit the login form
    LoginRequested(Credentials),

    /// End the session
    LogoutRequested,

    /// Open a top-level view
    NavigateRequested(Route),

    /// Toggle favorite membership of a movie (id or list position)
    ToggleFavoriteRequested { movie: String },

    /// Look up a movie by title
    ShowMovieRequested { title: String },

    /// Look up a director by name
    ShowDirectorRequested { name: String },

    /// Look up a genre by name
    ShowGenreRequested { name: String },

    /// Send a profile edit
    EditProfileRequested(ProfileForm),

    /// Ask for confirmation, then delete the account
    DeleteAccountRequested,

    /// Print the command list
    HelpRequested,

    /// Request to quit application
    QuitRequested,
}
