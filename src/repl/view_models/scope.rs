//! # View Scope
//!
//! Lifetime guard for a view-model. A request issued by a view runs to
//! completion even if the user navigates away, but its result is dropped
//! instead of being applied to a view that has been torn down.
//!
//! The controller awaits each view-model call before it reads the next line,
//! so today a teardown never overlaps an in-flight request. The guard only
//! takes effect once requests are dispatched concurrently with input.

use std::future::Future;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the owning view is still on screen
    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Mark the owning view as torn down
    pub fn close(&self) {
        self.token.cancel();
    }

    /// Await `request` and hand back its output only if the view is still active
    pub async fn guard<F: Future>(&self, request: F) -> Option<F::Output> {
        let output = request.await;
        if self.is_active() {
            Some(output)
        } else {
            tracing::debug!("View closed while a request was in flight; dropping response");
            None
        }
    }
}
