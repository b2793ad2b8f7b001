//! # flixline Main Entry Point
//!
//! REPL client for the myFlix movie catalog.

use anyhow::Result;
use flixline::cmd_args::CommandLineArgs;
use flixline::config::LOG_LEVEL_ENV_VAR;
use flixline::repl::io::{TerminalLineStream, TerminalRenderStream};
use flixline::AppController;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_LEVEL_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    init_tracing(cmd_args.verbose());

    let mut app = AppController::with_io_streams(
        cmd_args,
        TerminalLineStream::new(),
        TerminalRenderStream::new(),
    )?;
    app.run().await
}
