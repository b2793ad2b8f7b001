//! # API Gateway
//!
//! Typed access to the remote movie catalog service.
//!
//! Every remote endpoint has exactly one async operation on [`ApiClient`].
//! Results come back as [`ApiResult`], a discriminated success payload or a
//! normalized [`ApiError`]. The gateway never reads or writes the session;
//! callers pass the bearer token and username explicitly.

pub mod client;
pub mod error;
pub mod models;

pub use client::{ApiClient, DEFAULT_API_URL};
pub use error::{ApiError, ApiResult, GENERIC_FAILURE_MESSAGE};
pub use models::{
    Credentials, Director, Genre, LoginResponse, Movie, Registration, User, UserUpdate,
};
