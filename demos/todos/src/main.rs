//! Interactive todo list over stdin.
//!
//! Reads one command per line (see `help`) and re-renders the whole view
//! after every reduced action, including notifications expiring on their own.
//!
//! ```bash
//! TODOS_NOTIFICATION_TTL_MS=2000 RUST_LOG=todos=debug cargo run -p todos
//! ```

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use todos::shell::{self, Command};
use todos::{App, AppConfig, AppReducer, AppState, TodoStore};
use todos_runtime::StoreError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::try_from_env().context("invalid configuration")?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_level.clone().into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    tracing::info!(?config, "Starting todos");

    let initial = if config.seed_todos {
        AppState::seeded()
    } else {
        AppState::new()
    };

    let store: TodoStore = TodoStore::with_config(
        initial,
        AppReducer::new(),
        config.environment(),
        config.store_config(),
    );

    let renderer = tokio::spawn(render_on_change(store.clone()));

    println!("{}", store.state(App::render).await);
    println!("\n{}", shell::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match shell::parse_command(&line) {
            Ok(None) => {},
            Ok(Some(Command::Event(event))) => {
                let action = event.into_action(store.environment());
                store.send(action).await?;
            },
            Ok(Some(Command::List)) => println!("{}", store.state(App::render).await),
            Ok(Some(Command::Help)) => println!("{}", shell::HELP),
            Ok(Some(Command::Quit)) => break,
            Err(error) => println!("error: {error}"),
        }
    }

    match store.shutdown_gracefully().await {
        Ok(()) => {},
        Err(StoreError::ShutdownTimeout(pending)) => {
            tracing::info!(pending, "Dropping pending notification timers");
        },
        Err(error) => return Err(error.into()),
    }

    renderer.abort();
    Ok(())
}

/// Prints the view after every action the store reduces
async fn render_on_change(store: TodoStore) {
    let mut actions = store.subscribe_actions();

    loop {
        match actions.recv().await {
            Ok(action) => tracing::debug!(action = action.kind(), "Re-rendering"),
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Renderer lagged behind the store");
            },
            Err(RecvError::Closed) => break,
        }

        println!("\n{}", store.state(App::render).await);
    }
}
