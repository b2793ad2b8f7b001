//! # API Client
//!
//! One async method per remote endpoint. Authenticated methods take the bearer
//! token as an `Option`: a missing token is not pre-validated, the request is
//! sent without an `Authorization` header and the server decides.

use crate::api::error::{ApiError, ApiResult};
use crate::api::models::{
    Credentials, Director, Genre, LoginResponse, Movie, Registration, User, UserUpdate,
};
use anyhow::{Context, Result};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

/// Service the client talks to when no profile overrides it
pub const DEFAULT_API_URL: &str = "https://myflix-api-project.herokuapp.com/";

/// HTTP gateway to the movie catalog service
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the service rooted at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid API URL: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API URL cannot be used as a base: {base_url}");
        }

        let http = Client::builder()
            .user_agent(concat!("flixline/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        tracing::debug!("ApiClient created for {}", base_url);
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `POST /users`
    pub async fn register(&self, registration: &Registration) -> ApiResult<User> {
        let url = self.endpoint(&["users"])?;
        self.fetch(self.request(Method::POST, url, None).json(registration))
            .await
    }

    /// `POST /login`
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse> {
        let url = self.endpoint(&["login"])?;
        self.fetch(self.request(Method::POST, url, None).json(credentials))
            .await
    }

    /// `GET /movies`
    pub async fn list_movies(&self, token: Option<&str>) -> ApiResult<Vec<Movie>> {
        let url = self.endpoint(&["movies"])?;
        self.fetch(self.request(Method::GET, url, token)).await
    }

    /// `GET /movies/{title}`
    pub async fn get_movie(&self, token: Option<&str>, title: &str) -> ApiResult<Movie> {
        let url = self.endpoint(&["movies", title])?;
        self.fetch(self.request(Method::GET, url, token)).await
    }

    /// `GET /directors/{name}`
    pub async fn get_director(&self, token: Option<&str>, name: &str) -> ApiResult<Director> {
        let url = self.endpoint(&["directors", name])?;
        self.fetch(self.request(Method::GET, url, token)).await
    }

    /// `GET /genres/{name}`
    pub async fn get_genre(&self, token: Option<&str>, name: &str) -> ApiResult<Genre> {
        let url = self.endpoint(&["genres", name])?;
        self.fetch(self.request(Method::GET, url, token)).await
    }

    /// `GET /users/{username}`
    pub async fn get_user(&self, token: Option<&str>, username: &str) -> ApiResult<User> {
        let url = self.endpoint(&["users", username])?;
        self.fetch(self.request(Method::GET, url, token)).await
    }

    /// `PUT /users/{username}` with a full replacement record
    pub async fn edit_user(
        &self,
        token: Option<&str>,
        username: &str,
        update: &UserUpdate,
    ) -> ApiResult<User> {
        let url = self.endpoint(&["users", username])?;
        self.fetch(self.request(Method::PUT, url, token).json(update))
            .await
    }

    /// `DELETE /users/{username}`; the response body is ignored
    pub async fn delete_user(&self, token: Option<&str>, username: &str) -> ApiResult<()> {
        let url = self.endpoint(&["users", username])?;
        self.send(self.request(Method::DELETE, url, token))
            .await
            .map(|_| ())
    }

    /// `POST /users/{username}/movies/{movie_id}`
    pub async fn add_favorite(
        &self,
        token: Option<&str>,
        username: &str,
        movie_id: &str,
    ) -> ApiResult<User> {
        let url = self.endpoint(&["users", username, "movies", movie_id])?;
        self.fetch(self.request(Method::POST, url, token)).await
    }

    /// `DELETE /users/{username}/movies/{movie_id}`
    pub async fn remove_favorite(
        &self,
        token: Option<&str>,
        username: &str,
        movie_id: &str,
    ) -> ApiResult<User> {
        let url = self.endpoint(&["users", username, "movies", movie_id])?;
        self.fetch(self.request(Method::DELETE, url, token)).await
    }

    /// Append percent-encoded path segments to the base URL
    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ApiError::transport(format!("{} cannot be a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url, token: Option<&str>) -> RequestBuilder {
        tracing::debug!("{} {} (authenticated: {})", method, url, token.is_some());
        let builder = self.http.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and return the body of a 2xx response
    async fn send(&self, builder: RequestBuilder) -> ApiResult<String> {
        let response = builder.send().await.map_err(|e| logged(e.into()))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| logged(e.into()))?;

        if !status.is_success() {
            return Err(logged(ApiError::Status {
                status: status.as_u16(),
                body,
            }));
        }

        tracing::debug!("Response {} ({} bytes)", status.as_u16(), body.len());
        Ok(body)
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let body = self.send(builder).await?;
        serde_json::from_str(&body).map_err(|e| logged(e.into()))
    }
}

fn logged(error: ApiError) -> ApiError {
    tracing::error!("{}", error.detail());
    error
}
