//! Course schedule HTTP server binary.
//!
//! Loads the configuration, opens the document store, and serves the edit
//! endpoint, the document reads and the static page.
//!
//! # Usage
//!
//! ```bash
//! # Serve ./data with defaults (or ./course-schedule.toml when present)
//! cargo run --bin course-server
//!
//! # Explicit configuration file
//! cargo run --bin course-server -- path/to/course-schedule.toml
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `DATA_DIR`: Directory holding `<classId>.json` documents (default: data)
//! - `STATIC_DIR`: Directory served for unmatched paths (default: none)
//! - `REPOSITORY_TYPE`: `file` or `local` (default: file)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use course_schedule::config::ServiceConfig;
use course_schedule::db::{self, RepositoryFactory};
use course_schedule::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting course schedule server");

    let config_path = env::args().nth(1).map(PathBuf::from);
    let config = ServiceConfig::load(config_path.as_deref())?;

    let repository = RepositoryFactory::from_config(&config)?;
    if !db::health_check(repository.as_ref()).await? {
        warn!(
            "Data directory {} is not available; reads will fail until it exists",
            config.repository.data_dir.display()
        );
    }
    info!("Repository initialized ({})", config.repository.repo_type);

    let state = AppState::from_config(repository, &config)?;
    if state.edit_locks.is_some() {
        info!("Edits to the same class are serialized");
    }
    if let Some(dir) = &state.static_dir {
        info!("Serving static files from {}", dir.display());
    }

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
