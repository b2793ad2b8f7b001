//! # Navigation View-Model
//!
//! The signed-in navigation bar: which top-level view is current, and logout.

use crate::repl::events::{ModelEvent, PendingEvents, Route, ViewEvent};
use crate::repl::models::Notification;
use crate::session::SessionContext;

pub struct NavigationViewModel {
    session: SessionContext,
    route: Route,
    events: PendingEvents,
}

impl NavigationViewModel {
    /// Start on the catalog when a persisted session exists, otherwise on the welcome view
    pub fn new(session: SessionContext) -> Self {
        let route = if session.is_authenticated() {
            Route::Movies
        } else {
            Route::Welcome
        };
        Self {
            session,
            route,
            events: PendingEvents::new(),
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn events_mut(&mut self) -> &mut PendingEvents {
        &mut self.events
    }

    /// Switch to `route`. Returns `false` when the route needs a session and there is none.
    pub fn navigate(&mut self, route: Route) -> bool {
        if route.requires_session() && !self.session.is_authenticated() {
            tracing::debug!("Refusing to open '{}' without a session", route);
            self.events
                .notify(Notification::failure("Please log in first"));
            return false;
        }
        if self.route != route {
            tracing::debug!("Route {} -> {}", self.route, route);
            self.route = route;
        }
        self.events.emit_view(ViewEvent::ContentChanged);
        true
    }

    pub fn open_movies(&mut self) -> bool {
        self.navigate(Route::Movies)
    }

    pub fn open_favorites(&mut self) -> bool {
        self.navigate(Route::Favorites)
    }

    pub fn open_profile(&mut self) -> bool {
        self.navigate(Route::Profile)
    }

    /// End the session and return to the welcome view. Nothing moves when the
    /// stored session cannot be cleared.
    pub fn logout(&mut self) {
        if let Err(e) = self.session.end() {
            tracing::error!("Failed to clear session: {e:#}");
            self.events.notify(Notification::failure(format!("{e}")));
            return;
        }
        self.route = Route::Welcome;
        self.events.emit_model(ModelEvent::SessionEnded);
        self.events
            .notify(Notification::info("Logged Out Successfully"));
        self.events.emit_view(ViewEvent::ContentChanged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::store::StuckSessionStore;
    use crate::session::MemorySessionStore;

    #[test]
    fn navigation_should_refuse_private_routes_without_session() {
        let session = SessionContext::restore(MemorySessionStore::new()).unwrap();
        let mut nav = NavigationViewModel::new(session);
        assert_eq!(nav.route(), Route::Welcome);

        assert!(!nav.open_movies());
        assert_eq!(nav.route(), Route::Welcome);
        let (view, _) = nav.events_mut().drain();
        assert!(matches!(&view[..], [ViewEvent::Notify(n)] if n.is_failure()));
    }

    #[test]
    fn navigation_should_start_on_catalog_with_restored_session() {
        let session = SessionContext::restore(MemorySessionStore::new()).unwrap();
        session.begin("jwt", "alice").unwrap();
        let mut nav = NavigationViewModel::new(session);
        assert_eq!(nav.route(), Route::Movies);

        assert!(nav.open_profile());
        assert_eq!(nav.route(), Route::Profile);
        assert!(nav.open_favorites());
        assert_eq!(nav.route(), Route::Favorites);
    }

    #[test]
    fn logout_should_clear_session_and_return_to_welcome() {
        let session = SessionContext::restore(MemorySessionStore::new()).unwrap();
        session.begin("jwt", "alice").unwrap();
        let mut nav = NavigationViewModel::new(session.clone());

        nav.logout();

        assert!(!session.is_authenticated());
        assert_eq!(nav.route(), Route::Welcome);
        let (view, model) = nav.events_mut().drain();
        assert_eq!(model, vec![ModelEvent::SessionEnded]);
        assert!(view.contains(&ViewEvent::Notify(Notification::info(
            "Logged Out Successfully"
        ))));
    }

    #[test]
    fn failed_logout_should_not_claim_success() {
        let session = SessionContext::restore(StuckSessionStore::default()).unwrap();
        session.begin("jwt", "alice").unwrap();
        let mut nav = NavigationViewModel::new(session.clone());

        nav.logout();

        assert!(session.is_authenticated());
        assert_eq!(nav.route(), Route::Movies);
        let (view, model) = nav.events_mut().drain();
        assert!(model.is_empty());
        assert!(matches!(&view[..], [ViewEvent::Notify(n)] if n.is_failure()));
    }
}
