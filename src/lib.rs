//! Fintrack is a web app for tracking personal income and expenses.
//!
//! This library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use time::Date;
use tokio::signal;

mod alert;
mod app_state;
mod category;
mod dashboard;
mod endpoints;
mod html;
mod internal_server_error;
mod navigation;
mod not_found;
mod persistence;
mod routing;
mod timezone;
mod transaction;

pub use app_state::AppState;
pub use routing::build_router;

use crate::{alert::Alert, internal_server_error::InternalServerError};

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

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A date in the future was used to create or edit a transaction.
    ///
    /// Transactions record events that have already happened, therefore future
    /// dates are not allowed.
    #[error("{0} is a date in the future, which is not allowed")]
    FutureDate(Date),

    /// A zero or negative amount was used to create or edit a transaction.
    #[error("{0} is not a valid amount, amounts must be greater than zero")]
    NonPositiveAmount(f64),

    /// An empty string was used as a transaction description.
    #[error("transaction description cannot be empty")]
    EmptyDescription,

    /// An empty string was used as a transaction category.
    #[error("transaction category cannot be empty")]
    EmptyCategory,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// The ledger data file could not be read or written.
    #[error("could not access the data file: {0}")]
    DataFileError(String),

    /// The transactions could not be written out as CSV.
    #[error("could not export transactions: {0}")]
    ExportError(String),

    /// Could not acquire the ledger lock
    #[error("could not acquire the ledger lock")]
    LedgerLockError,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the ledger")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the ledger")]
    DeleteMissingTransaction,
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::ExportError(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::LedgerLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Invalid Timezone Settings",
                    &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings \
                        and ensure the timezone has been set to valid, canonical timezone string"
                    ),
                )
                .into_markup(),
            )
                .into_response(),
            Error::FutureDate(date) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid transaction date",
                    &format!(
                        "{date} is a date in the future, which is not allowed. \
                        Change the date to today or earlier."
                    ),
                )
                .into_markup(),
            )
                .into_response(),
            Error::NonPositiveAmount(amount) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid transaction amount",
                    &format!("{amount} is not a valid amount. Enter an amount greater than zero."),
                )
                .into_markup(),
            )
                .into_response(),
            Error::EmptyDescription => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Missing description",
                    "Enter a description for the transaction.",
                )
                .into_markup(),
            )
                .into_response(),
            Error::EmptyCategory => (
                StatusCode::BAD_REQUEST,
                Alert::error("Missing category", "Choose a category for the transaction.")
                    .into_markup(),
            )
                .into_response(),
            Error::UpdateMissingTransaction => (
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not update transaction",
                    "The transaction could not be found.",
                )
                .into_markup(),
            )
                .into_response(),
            Error::DeleteMissingTransaction => (
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not delete transaction",
                    "The transaction could not be found. \
                    Try refreshing the page to see if the transaction has already been deleted.",
                )
                .into_markup(),
            )
                .into_response(),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                )
                .into_markup(),
            )
                .into_response(),
        }
    }
}
