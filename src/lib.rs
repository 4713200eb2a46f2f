//! Fintrack is a REST API for tracking personal income and spending.
//!
//! It provides JWT authenticated endpoints for recording transactions,
//! organizing them into categories, setting monthly budgets and reporting
//! income and expense totals. Data is persisted to SQLite and deletions are
//! soft: deleted records drop out of every listing and aggregate but can be
//! restored by their owner.

#![warn(missing_docs)]

use std::time::Duration;

use axum_server::Handle;
use tokio::signal;

pub mod auth;
pub mod db;
mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod stores;

pub use error::Error;
pub use routes::build_router;
pub use state::AppState;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
