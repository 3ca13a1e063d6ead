//! Defines the endpoint for downloading every transaction as a CSV file.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::header,
    response::{IntoResponse, Response},
};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{AppState, Error, timezone::current_local_date, transaction::Ledger};

const EXPORT_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month repr:numerical padding:zero]-[day padding:zero]");

/// The state needed to export transactions.
#[derive(Debug, Clone)]
pub struct ExportTransactionsState {
    /// The in-memory transaction ledger.
    pub ledger: Arc<Mutex<Ledger>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ExportTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler that serves every transaction as a CSV download.
///
/// The export always covers the full ledger regardless of any filters active
/// on the transactions page. The file is named after the current local date,
/// e.g. `transactions-2025-08-26.csv`.
pub async fn export_transactions_endpoint(
    State(state): State<ExportTransactionsState>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;

    let ledger = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("Could not acquire ledger lock: {error}"))
        .map_err(|_| Error::LedgerLockError)?;

    let csv = transactions_to_csv(&ledger)?;
    let filename = format!("transactions-{}.csv", format_export_date(today));

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
        .into_response())
}

fn transactions_to_csv(ledger: &Ledger) -> Result<Vec<u8>, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(["Date", "Type", "Category", "Description", "Amount"])?;

    for transaction in ledger.transactions() {
        writer.write_record([
            format_export_date(transaction.occurred_at),
            transaction.kind.as_str().to_owned(),
            transaction.category.clone(),
            transaction.description.clone(),
            transaction.amount.to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|error| Error::ExportError(error.to_string()))
}

fn format_export_date(date: Date) -> String {
    date.format(EXPORT_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}
