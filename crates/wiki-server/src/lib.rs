//! HTTP server for the wiki.
//!
//! This crate provides an axum server rendering HTML pages for browsing,
//! searching, creating and editing wiki entries.
//!
//! # Routes
//!
//! | Path | Method | Behavior |
//! |---|---|---|
//! | `/` | GET | list all titles |
//! | `/` | POST | search (`q`) |
//! | `/wiki/{title}` | GET | show the entry, or related titles with 404 |
//! | `/wiki/{title}` | POST | search (`q`) |
//! | `/wiki/create/` | GET, POST | create form / create entry |
//! | `/wiki/random/` | GET | redirect to a random entry |
//! | `/wiki/edit/?{title}` | GET | edit form |
//! | `/wiki/edit/` | POST | save entry |
//!
//! Any POST carrying a non-empty `q` field is a search, whatever page it
//! was submitted from.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use wiki_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_owned(),
//!         port: 8000,
//!         entries_dir: PathBuf::from("entries"),
//!         extension: "md".to_owned(),
//!         version: "1.0.0".to_owned(),
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;
mod views;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use state::AppState;
use wiki_site::Wiki;
use wiki_storage::Storage;
use wiki_storage_fs::FsStorage;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory holding one file per entry.
    pub entries_dir: PathBuf,
    /// Entry file extension without the leading dot.
    pub extension: String,
    /// Application version (for cache invalidation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8000,
            entries_dir: PathBuf::from("entries"),
            extension: "md".to_owned(),
            version: String::new(),
        }
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage: Arc<dyn Storage> = Arc::new(FsStorage::with_extension(
        config.entries_dir.clone(),
        &config.extension,
    ));

    let state = Arc::new(AppState {
        wiki: Wiki::new(storage),
        version: config.version.clone(),
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(
        address = %addr,
        entries_dir = %config.entries_dir.display(),
        "Starting server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        return;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from wiki config.
///
/// # Arguments
///
/// * `config` - Wiki configuration
/// * `version` - Application version
#[must_use]
pub fn server_config_from_wiki_config(config: &wiki_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        entries_dir: config.entries_resolved.dir.clone(),
        extension: config.entries_resolved.extension.clone(),
        version,
    }
}
