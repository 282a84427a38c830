//! Expense Tracker is a web service for recording personal expenses.
//!
//! Users register or log in to receive a bearer token, then record expenses
//! with a title, amount, category and date. Every expense belongs to the user
//! that created it and only that user may read, change or delete it.
//!
//! This library provides the JSON REST API, the SQLite storage behind it and
//! the spending summary used by the dashboard.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod auth;
mod budget;
mod database_id;
mod date_format;
mod db;
mod email;
mod endpoints;
mod error;
mod expense;
mod logging;
mod not_found;
mod password;
mod routing;
mod summary;
mod user;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use auth::{DEFAULT_TOKEN_DURATION, Identity};
pub use database_id::ExpenseId;
pub use db::initialize as initialize_db;
pub use email::Email;
pub use error::Error;
pub use expense::{CategoryPolicy, Expense, NewExpense, SUGGESTED_CATEGORIES, create_expense};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use password::{PasswordHash, ValidatedPassword};
pub use routing::build_router;
pub use user::{User, UserID, create_user, get_user_by_id};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
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
