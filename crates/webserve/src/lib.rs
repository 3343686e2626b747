//! Read-only static file server for the web build.

pub mod config;
mod files;

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use axum::{routing::get, Router};
use tokio::net::TcpListener;

pub use config::ServeConfig;

#[derive(thiserror::Error, Debug)]
pub enum ServeError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Builds the router serving files below `root`.
pub fn app(root: PathBuf) -> Router {
    let root = Arc::new(root);
    Router::new()
        .route("/", get(files::serve_file))
        .route("/{*path}", get(files::serve_file))
        .with_state(root)
}

/// Binds `addr`, mapping failure to [`ServeError::Bind`].
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ServeError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })
}

/// Serves `root` on `listener` until the process exits.
pub async fn run(listener: TcpListener, root: PathBuf) -> Result<(), ServeError> {
    axum::serve(listener, app(root)).await?;
    Ok(())
}
