//! Defines the endpoint for updating an existing transaction.
use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    persistence::save_ledger,
    timezone::current_local_date,
    transaction::{Ledger, Transaction, UpdateOutcome, form::TransactionForm},
};

/// The state needed to update a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    /// The in-memory transaction ledger.
    pub ledger: Arc<Mutex<Ledger>>,
    /// The path the ledger is saved to after every mutation.
    pub data_path: PathBuf,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            data_path: state.data_path.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters for the edit transaction endpoint.
#[derive(Debug, Deserialize)]
pub struct QueryParams {
    /// The URL to redirect to after the edit is saved.
    pub redirect_url: Option<String>,
}

/// A route handler for updating a transaction, redirects to `redirect_url`
/// (the transactions view by default) on success.
///
/// The stored record keeps its ID and creation timestamp, every other field
/// is replaced with the form's values.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Path(transaction_id): Path<String>,
    Query(query_params): Query<QueryParams>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let today = match current_local_date(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    if let Err(error) = form.validate(today) {
        tracing::error!("Rejected edit of transaction {transaction_id}: {error}");
        return error.into_alert_response();
    }

    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("Could not acquire ledger lock: {error}");
            return Error::LedgerLockError.into_alert_response();
        }
    };

    let recorded_at = match ledger.get(&transaction_id) {
        Some(transaction) => transaction.recorded_at,
        None => {
            tracing::error!("Could not update transaction {transaction_id}: no such transaction");
            return Error::UpdateMissingTransaction.into_alert_response();
        }
    };

    let input = form.into_input();
    let outcome = ledger.update(Transaction {
        id: transaction_id,
        kind: input.kind,
        amount: input.amount,
        description: input.description,
        category: input.category,
        occurred_at: input.occurred_at,
        recorded_at,
    });

    if outcome == UpdateOutcome::NotFound {
        return Error::UpdateMissingTransaction.into_alert_response();
    }

    if let Err(error) = save_ledger(&state.data_path, &ledger) {
        tracing::error!("Could not save transactions: {error}");
        return error.into_alert_response();
    }

    let redirect_url = query_params
        .redirect_url
        .unwrap_or(endpoints::TRANSACTIONS_VIEW.to_owned());

    (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, Query, State},
        http::{HeaderValue, StatusCode},
    };
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use time::macros::date;

    use crate::transaction::{
        Ledger, Transaction, TransactionInput, TransactionKind,
        edit_endpoint::{EditTransactionState, QueryParams, edit_transaction_endpoint},
        form::TransactionForm,
    };

    fn temp_data_path() -> std::path::PathBuf {
        std::env::temp_dir().join(format!("fintrack-test-{}.json", uuid::Uuid::new_v4()))
    }

    fn create_test_state() -> (EditTransactionState, Transaction) {
        let mut ledger = Ledger::new();
        let transaction = ledger.add(TransactionInput {
            kind: TransactionKind::Expense,
            amount: 1.23,
            description: "test".to_owned(),
            category: "Shopping".to_owned(),
            occurred_at: date!(2025 - 03 - 04),
        });
        let state = EditTransactionState {
            ledger: Arc::new(Mutex::new(ledger)),
            data_path: temp_data_path(),
            local_timezone: "Etc/UTC".to_owned(),
        };

        (state, transaction)
    }

    #[tokio::test]
    async fn can_update_transaction() {
        let (state, original) = create_test_state();
        let form = TransactionForm {
            kind: TransactionKind::Income,
            amount: 3.21,
            date: date!(2025 - 03 - 05),
            description: "foo".to_owned(),
            category: "Salary".to_owned(),
        };
        let redirect_url = "/transactions?sort=amount&order=asc".to_owned();

        let response = edit_transaction_endpoint(
            State(state.clone()),
            Path(original.id.clone()),
            Query(QueryParams {
                redirect_url: Some(redirect_url.clone()),
            }),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(HX_REDIRECT),
            Some(&HeaderValue::from_str(&redirect_url).unwrap())
        );
        let ledger = state.ledger.lock().unwrap();
        let got = ledger.get(&original.id).expect("transaction went missing");
        assert_eq!(got.kind, TransactionKind::Income);
        assert_eq!(got.amount, 3.21);
        assert_eq!(got.occurred_at, date!(2025 - 03 - 05));
        assert_eq!(got.description, "foo");
        assert_eq!(got.category, "Salary");
        assert_eq!(
            got.recorded_at, original.recorded_at,
            "updates must preserve the creation timestamp"
        );
        assert!(state.data_path.exists());

        std::fs::remove_file(&state.data_path).unwrap();
    }

    #[tokio::test]
    async fn redirects_to_transactions_view_by_default() {
        let (state, original) = create_test_state();
        let form = TransactionForm {
            kind: TransactionKind::Expense,
            amount: 2.0,
            date: date!(2025 - 03 - 04),
            description: "test".to_owned(),
            category: "Shopping".to_owned(),
        };

        let response = edit_transaction_endpoint(
            State(state.clone()),
            Path(original.id),
            Query(QueryParams { redirect_url: None }),
            Form(form),
        )
        .await;

        assert_eq!(
            response.headers().get(HX_REDIRECT),
            Some(&HeaderValue::from_static("/transactions"))
        );

        std::fs::remove_file(&state.data_path).unwrap();
    }

    #[tokio::test]
    async fn returns_not_found_for_unknown_transaction() {
        let (state, _) = create_test_state();
        let form = TransactionForm {
            kind: TransactionKind::Expense,
            amount: 2.0,
            date: date!(2025 - 03 - 04),
            description: "test".to_owned(),
            category: "Shopping".to_owned(),
        };

        let response = edit_transaction_endpoint(
            State(state.clone()),
            Path("no-such-id".to_owned()),
            Query(QueryParams { redirect_url: None }),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(
            !state.data_path.exists(),
            "a failed update must not save the ledger"
        );
    }

    #[tokio::test]
    async fn rejects_invalid_form_without_updating() {
        let (state, original) = create_test_state();
        let form = TransactionForm {
            kind: TransactionKind::Expense,
            amount: -5.0,
            date: date!(2025 - 03 - 04),
            description: "test".to_owned(),
            category: "Shopping".to_owned(),
        };

        let response = edit_transaction_endpoint(
            State(state.clone()),
            Path(original.id.clone()),
            Query(QueryParams { redirect_url: None }),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let ledger = state.ledger.lock().unwrap();
        assert_eq!(ledger.get(&original.id).unwrap().amount, 1.23);
    }
}
