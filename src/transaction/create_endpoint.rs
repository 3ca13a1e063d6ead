//! Defines the endpoint for creating a new transaction.
use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    AppState, Error, endpoints,
    persistence::save_ledger,
    timezone::current_local_date,
    transaction::{Ledger, form::TransactionForm},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The in-memory transaction ledger.
    pub ledger: Arc<Mutex<Ledger>>,
    /// The path the ledger is saved to after every mutation.
    pub data_path: PathBuf,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            data_path: state.data_path.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for creating a new transaction, redirects to the
/// transactions view on success.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let today = match current_local_date(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    if let Err(error) = form.validate(today) {
        tracing::error!("Rejected new transaction: {error}");
        return error.into_alert_response();
    }

    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("Could not acquire ledger lock: {error}");
            return Error::LedgerLockError.into_alert_response();
        }
    };

    ledger.add(form.into_input());

    if let Err(error) = save_ledger(&state.data_path, &ledger) {
        tracing::error!("Could not save transactions: {error}");
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
