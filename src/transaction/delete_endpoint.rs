//! Defines the endpoint for deleting a transaction.
use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, Path, State},
    response::{Html, IntoResponse, Response},
};

use crate::{
    AppState, Error,
    persistence::save_ledger,
    transaction::{DeleteOutcome, Ledger},
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The in-memory transaction ledger.
    pub ledger: Arc<Mutex<Ledger>>,
    /// The path the ledger is saved to after every mutation.
    pub data_path: PathBuf,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            data_path: state.data_path.clone(),
        }
    }
}

/// A route handler for deleting a transaction.
///
/// Responds with an error alert if the transaction does not exist.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<String>,
) -> Response {
    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("Could not acquire ledger lock: {error}");
            return Error::LedgerLockError.into_alert_response();
        }
    };

    if ledger.delete(&transaction_id) == DeleteOutcome::NotFound {
        tracing::error!("Could not delete transaction {transaction_id}: no such transaction");
        return Error::DeleteMissingTransaction.into_alert_response();
    }

    if let Err(error) = save_ledger(&state.data_path, &ledger) {
        tracing::error!("Could not save transactions: {error}");
        return error.into_alert_response();
    }

    // The status code has to be 200 OK or HTMX will not delete the table row.
    Html("").into_response()
}
