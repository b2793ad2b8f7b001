//! # ViewModel Module
//!
//! One view-model per screen or form. Each owns its UI-facing state, talks to
//! the API client and queues events for the controller; none of them renders.

pub mod auth;
pub mod catalog;
pub mod navigation;
pub mod profile;
pub mod scope;

pub use auth::{LoginViewModel, RegistrationViewModel};
pub use catalog::{CatalogViewModel, Detail};
pub use navigation::NavigationViewModel;
pub use profile::{ProfileForm, ProfileViewModel};
pub use scope::ViewScope;
