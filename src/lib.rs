//! Finanzas is a small web app for keeping a personal ledger of savings and expenses.
//!
//! Expenses can be labelled with categories, and the movements page shows the total
//! saved, the total spent and the balance between them.
//!
//! This library provides the HTTP routes that directly serve HTML pages, plus the
//! database functions they are built on.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod category;
mod db;
mod endpoints;
mod error;
mod error_page;
mod html;
mod landing;
mod logging;
mod movement;
mod navigation;
mod routing;
mod summary;
#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use category::{Category, CategoryId, CategoryName, create_category};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use movement::{Amount, Movement, MovementKind, create_movement};
pub use routing::build_router;
pub use summary::{Summary, get_summary};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
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
