//! # Session
//!
//! Client-held proof of authentication and its persistence.

pub mod context;
pub mod store;

pub use context::SessionContext;
pub use store::{IniSessionStore, MemorySessionStore, Session, SessionStore};
