//! # flixline - Terminal Client for the myFlix Movie API
//!
//! A line-oriented REPL for browsing the movie catalog, keeping a favorites
//! list and managing the user's profile.
//!
//! ## Architecture
//!
//! This application follows the Model-View-ViewModel (MVVM) pattern:
//!
//! ```text
//! ┌─────────────┐    Events    ┌──────────────┐   Requests   ┌───────────┐
//! │    View     │◄─────────────│  ViewModel   │─────────────▶│ ApiClient │
//! │             │              │              │              │           │
//! │ - Rendering │              │ - Catalog    │              │ - REST    │
//! │ - Prompt    │              │ - Profile    │              │ - Bearer  │
//! │             │              │ - Auth forms │              │   auth    │
//! └─────────────┘              └──────────────┘              └───────────┘
//!                                      ▲        │
//!                             Commands │        ▼
//!                               ┌──────────────┐  ┌────────────────┐
//!                               │  Controller  │  │ SessionContext │
//!                               │ - Line input │  │ - token        │
//!                               │ - Event loop │  │ - INI file     │
//!                               └──────────────┘  └────────────────┘
//! ```

pub mod api;
pub mod cmd_args;
pub mod config;
pub mod repl;
pub mod session;

// Re-export main types for easy access
pub use repl::*;
