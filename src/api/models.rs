//! # API Models
//!
//! Wire types exchanged with the catalog service. The service speaks
//! PascalCase JSON with a Mongo-style `_id`; the Rust side uses snake_case.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Director metadata embedded in a movie
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Director {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Bio", default)]
    pub bio: String,
    #[serde(rename = "Birth", alias = "Born", default)]
    pub born: Option<String>,
    #[serde(rename = "Death", alias = "Died", default)]
    pub died: Option<String>,
}

/// Genre metadata embedded in a movie
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Description", default)]
    pub description: String,
}

/// A catalog entry. Read-only on the client; identity is `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Director", default)]
    pub director: Director,
    #[serde(rename = "Genre", default)]
    pub genre: Genre,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "ImagePath", default)]
    pub image_url: String,
    #[serde(rename = "Featured", default)]
    pub featured: bool,
}

/// An account record as returned by the service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Email", default)]
    pub email: String,
    #[serde(rename = "Birthday", default)]
    pub birthday: Option<String>,
    #[serde(rename = "FavoriteMovies", default)]
    pub favorite_movie_ids: BTreeSet<String>,
}

impl User {
    pub fn has_favorite(&self, movie_id: &str) -> bool {
        self.favorite_movie_ids.contains(movie_id)
    }
}

/// Login form payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
}

/// Registration form payload, sent verbatim
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Birthday", skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}

/// Full replacement payload for `PUT /users/{username}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Birthday", skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}

/// Body of a successful `POST /login`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}
