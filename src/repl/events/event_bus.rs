//! # Model Event Bus
//!
//! Fans model events out to observers once the controller has applied them.
//! View events never reach the bus; the controller consumes those directly.

use super::model_events::ModelEvent;

/// Observer of applied model events
pub type Subscriber = Box<dyn Fn(&ModelEvent) + Send + Sync>;

#[derive(Default)]
pub struct ModelEventBus {
    subscribers: Vec<Subscriber>,
}

impl ModelEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bus whose first subscriber writes each event to the activity log
    pub fn with_activity_log() -> Self {
        let mut bus = Self::new();
        bus.subscribe(Box::new(log_activity));
        bus
    }

    pub fn subscribe(&mut self, subscriber: Subscriber) {
        self.subscribers.push(subscriber);
    }

    /// Deliver `event` to every subscriber in subscription order
    pub fn publish(&self, event: &ModelEvent) {
        self.subscribers.iter().for_each(|notify| notify(event));
    }
}

fn log_activity(event: &ModelEvent) {
    match event {
        ModelEvent::MoviesLoaded { count } => tracing::debug!(count, "movies loaded"),
        ModelEvent::UserLoaded { username } => tracing::debug!(%username, "user loaded"),
        ModelEvent::FavoriteAdded { movie_id } => tracing::info!(%movie_id, "favorite added"),
        ModelEvent::FavoriteRemoved { movie_id } => {
            tracing::info!(%movie_id, "favorite removed")
        }
        ModelEvent::UserRegistered { username } => tracing::info!(%username, "user registered"),
        ModelEvent::SessionStarted { username } => tracing::info!(%username, "session started"),
        ModelEvent::SessionEnded => tracing::info!("session ended"),
        ModelEvent::ProfileUpdated { username } => tracing::info!(%username, "profile updated"),
        ModelEvent::AccountDeleted { username } => tracing::info!(%username, "account deleted"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Subscriber, Arc<Mutex<Vec<ModelEvent>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let subscriber: Subscriber = Box::new(move |event| sink.lock().unwrap().push(event.clone()));
        (subscriber, seen)
    }

    #[test]
    fn publish_should_reach_subscribers_in_order() {
        let mut bus = ModelEventBus::new();
        let (subscriber, seen) = recorder();
        bus.subscribe(subscriber);

        bus.publish(&ModelEvent::SessionStarted {
            username: "alice".to_string(),
        });
        bus.publish(&ModelEvent::SessionEnded);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ModelEvent::SessionStarted {
                    username: "alice".to_string()
                },
                ModelEvent::SessionEnded,
            ]
        );
    }

    #[test]
    fn activity_log_should_share_the_bus_with_other_subscribers() {
        let mut bus = ModelEventBus::with_activity_log();
        let (first, seen_first) = recorder();
        let (second, seen_second) = recorder();
        bus.subscribe(first);
        bus.subscribe(second);

        let event = ModelEvent::FavoriteRemoved {
            movie_id: "m2".to_string(),
        };
        bus.publish(&event);

        assert_eq!(*seen_first.lock().unwrap(), vec![event.clone()]);
        assert_eq!(*seen_second.lock().unwrap(), vec![event]);
    }
}
