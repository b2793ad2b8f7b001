//! Common test utilities and infrastructure
//!
//! - A stateful fake of the remote API
//! - Controller construction over scripted input and captured output
//! - Tracing setup driven by `FLIXLINE_TEST_LOG_LEVEL`

pub mod fake_api;

use std::sync::Once;

use flixline::api::ApiClient;
use flixline::repl::io::{MockLineStream, MockRenderStream};
use flixline::session::SessionContext;
use flixline::AppController;

#[allow(unused_imports)]
pub use fake_api::{movie, FakeMyFlix};

static TRACING: Once = Once::new();

/// Install a stderr subscriber once per test binary
pub fn init_tracing() {
    TRACING.call_once(|| {
        let log_level = std::env::var("FLIXLINE_TEST_LOG_LEVEL").unwrap_or_default();
        let level = match log_level.as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "info" => tracing::Level::INFO,
            "warn" => tracing::Level::WARN,
            _ => tracing::Level::ERROR,
        };
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

pub type ScriptedController = AppController<MockLineStream, MockRenderStream>;

/// Controller reading `lines` and writing into the returned capture
#[allow(dead_code)]
pub fn scripted_controller(
    server_uri: &str,
    session: SessionContext,
    lines: &[&str],
) -> (ScriptedController, MockRenderStream) {
    let captured = MockRenderStream::new();
    let controller = AppController::with_session(
        ApiClient::new(server_uri).unwrap(),
        session,
        "test",
        MockLineStream::new(lines.iter().copied()),
        captured.clone(),
    );
    (controller, captured)
}

/// The two-movie catalog used across tests
#[allow(dead_code)]
pub fn two_movies() -> Vec<serde_json::Value> {
    vec![
        movie("m1", "A", "Francis Ford Coppola", "Crime"),
        movie("m2", "B", "Stanley Kubrick", "Drama"),
    ]
}
