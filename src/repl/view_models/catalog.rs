//! # Catalog View-Model
//!
//! Owns the movie list and the signed-in user's record, derives favorites
//! membership from them and toggles favorites through the API.
//!
//! There is no optimistic update: every toggle, successful or not, is followed
//! by a full reload so local state converges to what the server holds.

use crate::api::{
    ApiClient, ApiError, Director, Genre, Movie, User, GENERIC_FAILURE_MESSAGE,
};
use crate::repl::events::{ModelEvent, PendingEvents, ViewEvent};
use crate::repl::models::Notification;
use crate::repl::view_models::scope::ViewScope;
use crate::session::SessionContext;

/// Confirmation shown after a favorite change
const TOGGLE_NOTIFICATION_MS: u64 = 3000;

/// Record looked up on demand and shown below the list
#[derive(Debug, Clone, PartialEq)]
pub enum Detail {
    Movie(Movie),
    Director(Director),
    Genre(Genre),
}

pub struct CatalogViewModel {
    api: ApiClient,
    session: SessionContext,
    scope: ViewScope,
    movies: Vec<Movie>,
    user: Option<User>,
    detail: Option<Detail>,
    events: PendingEvents,
}

impl CatalogViewModel {
    pub fn new(api: ApiClient, session: SessionContext) -> Self {
        Self {
            api,
            session,
            scope: ViewScope::new(),
            movies: Vec::new(),
            user: None,
            detail: None,
            events: PendingEvents::new(),
        }
    }

    pub fn teardown(&self) {
        self.scope.close();
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn detail(&self) -> Option<&Detail> {
        self.detail.as_ref()
    }

    pub fn events_mut(&mut self) -> &mut PendingEvents {
        &mut self.events
    }

    /// Membership check; `false` until the user record has loaded
    pub fn is_favorite(&self, movie_id: &str) -> bool {
        self.user
            .as_ref()
            .is_some_and(|user| user.has_favorite(movie_id))
    }

    /// Movies whose id is in the user's favorites, in catalog order
    pub fn favorite_movies(&self) -> Vec<&Movie> {
        self.movies
            .iter()
            .filter(|movie| self.is_favorite(&movie.id))
            .collect()
    }

    /// Resolve a command argument to a movie id.
    ///
    /// Accepts a movie id, or a 1-based position in the list currently shown
    /// (the favorites list when `favorites_only`). Unknown input is passed
    /// through untouched and left for the server to judge.
    pub fn resolve_movie_id(&self, arg: &str, favorites_only: bool) -> String {
        if self.movies.iter().any(|m| m.id == arg) {
            return arg.to_string();
        }

        let shown: Vec<&Movie> = if favorites_only {
            self.favorite_movies()
        } else {
            self.movies.iter().collect()
        };

        arg.parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| shown.get(i))
            .map(|movie| movie.id.clone())
            .unwrap_or_else(|| arg.to_string())
    }

    /// Fetch the movie list and the user record concurrently and apply both
    pub async fn load(&mut self) {
        let token = self.session.token();
        let username = self.session.username().unwrap_or_default();
        let api = &self.api;

        let Some((movies, user)) = self
            .scope
            .guard(async {
                tokio::join!(
                    api.list_movies(token.as_deref()),
                    api.get_user(token.as_deref(), &username)
                )
            })
            .await
        else {
            return;
        };

        let mut failed = false;

        match movies {
            Ok(movies) => {
                self.events.emit_model(ModelEvent::MoviesLoaded {
                    count: movies.len(),
                });
                self.movies = movies;
            }
            Err(e) => {
                tracing::warn!("Movie list not refreshed: {}", e.detail());
                failed = true;
            }
        }

        match user {
            Ok(user) => {
                self.events.emit_model(ModelEvent::UserLoaded {
                    username: user.username.clone(),
                });
                self.user = Some(user);
            }
            Err(e) => {
                tracing::warn!("User record not refreshed: {}", e.detail());
                failed = true;
            }
        }

        if failed {
            self.events.notify(Notification::failure(GENERIC_FAILURE_MESSAGE));
        }
        self.events.emit_view(ViewEvent::ContentChanged);
    }

    /// Add the movie to favorites if absent, remove it if present, then re-sync
    pub async fn toggle(&mut self, movie_id: &str) {
        let title = self
            .movies
            .iter()
            .find(|m| m.id == movie_id)
            .map(|m| m.title.clone())
            .unwrap_or_else(|| movie_id.to_string());
        let favorited = self.is_favorite(movie_id);
        let token = self.session.token();
        let username = self.session.username().unwrap_or_default();
        let api = &self.api;

        tracing::debug!(
            "Toggling '{}' (currently favorite: {})",
            movie_id,
            favorited
        );

        let Some(result) = self
            .scope
            .guard(async {
                if favorited {
                    api.remove_favorite(token.as_deref(), &username, movie_id)
                        .await
                } else {
                    api.add_favorite(token.as_deref(), &username, movie_id)
                        .await
                }
            })
            .await
        else {
            return;
        };

        match result {
            Ok(_) if favorited => {
                self.events.notify(
                    Notification::info(format!("{title} has been removed from your favorites"))
                        .with_duration_ms(TOGGLE_NOTIFICATION_MS),
                );
                self.events.emit_model(ModelEvent::FavoriteRemoved {
                    movie_id: movie_id.to_string(),
                });
            }
            Ok(_) => {
                self.events.notify(
                    Notification::info(format!("{title} has been added to your favorites"))
                        .with_duration_ms(TOGGLE_NOTIFICATION_MS),
                );
                self.events.emit_model(ModelEvent::FavoriteAdded {
                    movie_id: movie_id.to_string(),
                });
            }
            Err(e) => self.notify_failure(&e),
        }

        // The mutation response is not trusted as the new state; read it back.
        self.load().await;
    }

    /// `GET /movies/{title}` into the detail panel
    pub async fn show_movie(&mut self, title: &str) {
        let token = self.session.token();
        let api = &self.api;
        if let Some(result) = self
            .scope
            .guard(api.get_movie(token.as_deref(), title))
            .await
        {
            self.apply_detail(result.map(Detail::Movie));
        }
    }

    /// `GET /directors/{name}` into the detail panel
    pub async fn show_director(&mut self, name: &str) {
        let token = self.session.token();
        let api = &self.api;
        if let Some(result) = self
            .scope
            .guard(api.get_director(token.as_deref(), name))
            .await
        {
            self.apply_detail(result.map(Detail::Director));
        }
    }

    /// `GET /genres/{name}` into the detail panel
    pub async fn show_genre(&mut self, name: &str) {
        let token = self.session.token();
        let api = &self.api;
        if let Some(result) = self
            .scope
            .guard(api.get_genre(token.as_deref(), name))
            .await
        {
            self.apply_detail(result.map(Detail::Genre));
        }
    }

    pub fn clear_detail(&mut self) {
        self.detail = None;
    }

    fn apply_detail(&mut self, result: Result<Detail, ApiError>) {
        match result {
            Ok(detail) => {
                self.detail = Some(detail);
                self.events.emit_view(ViewEvent::ContentChanged);
            }
            Err(e) => self.notify_failure(&e),
        }
    }

    fn notify_failure(&mut self, error: &ApiError) {
        self.events.notify(Notification::failure(error.to_string()));
    }
}
