//! Loading and saving the transaction ledger as a JSON file.
//!
//! The whole ledger lives in a single JSON document of the shape
//! `{"transactions": [...]}`. Saves write a temporary file in the same
//! directory and rename it into place, so a crash mid-write leaves the
//! previous file intact.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use time::macros::{date, datetime};

use crate::{
    Error,
    transaction::{Ledger, Transaction, TransactionKind},
};

/// The on-disk document holding the transaction list.
#[derive(Debug, Serialize, Deserialize)]
struct LedgerDocument {
    transactions: Vec<Transaction>,
}

/// Load the ledger from `path`.
///
/// A missing file is not an error: the ledger is seeded with the sample
/// transactions and written to `path` straight away, so a fresh install
/// starts with a populated dashboard.
///
/// # Errors
/// Returns [Error::DataFileError] when the file exists but cannot be read or
/// parsed. A corrupt data file should stop the server at startup rather than
/// silently become an empty ledger that overwrites the user's records on the
/// next save.
pub fn load_ledger(path: &Path) -> Result<Ledger, Error> {
    if !path.exists() {
        let ledger = Ledger::from_transactions(sample_transactions());
        save_ledger(path, &ledger)?;
        tracing::info!("Created new data file at {}", path.display());

        return Ok(ledger);
    }

    let contents = fs::read_to_string(path).map_err(|error| {
        Error::DataFileError(format!("could not read {}: {error}", path.display()))
    })?;

    let document: LedgerDocument = serde_json::from_str(&contents).map_err(|error| {
        Error::DataFileError(format!("could not parse {}: {error}", path.display()))
    })?;

    Ok(Ledger::from_transactions(document.transactions))
}

/// Write the ledger to `path`, replacing any previous contents.
///
/// # Errors
/// Returns [Error::JSONSerializationError] when the ledger cannot be
/// serialized, or [Error::DataFileError] when the temporary file cannot be
/// written or renamed into place.
pub fn save_ledger(path: &Path, ledger: &Ledger) -> Result<(), Error> {
    let document = LedgerDocument {
        transactions: ledger.transactions().to_vec(),
    };
    let contents = serde_json::to_string_pretty(&document)
        .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, contents).map_err(|error| {
        Error::DataFileError(format!("could not write {}: {error}", temp_path.display()))
    })?;
    fs::rename(&temp_path, path).map_err(|error| {
        Error::DataFileError(format!("could not replace {}: {error}", path.display()))
    })?;

    Ok(())
}

/// The demonstration transactions installed on first run.
fn sample_transactions() -> Vec<Transaction> {
    [
        (
            "sample-1",
            TransactionKind::Income,
            5000.0,
            "Monthly Salary",
            "Salary",
            date!(2025 - 04 - 01),
            datetime!(2025-04-01 0:00 UTC),
        ),
        (
            "sample-2",
            TransactionKind::Expense,
            1200.0,
            "Rent Payment",
            "Bills & Utilities",
            date!(2025 - 04 - 21),
            datetime!(2025-04-21 0:00 UTC),
        ),
        (
            "sample-3",
            TransactionKind::Income,
            5575.0,
            "salary",
            "Salary",
            date!(2025 - 05 - 02),
            datetime!(2025-05-02 0:00 UTC),
        ),
        (
            "sample-4",
            TransactionKind::Expense,
            320.0,
            "Electric Bill",
            "Bills & Utilities",
            date!(2025 - 05 - 25),
            datetime!(2025-05-25 0:00 UTC),
        ),
        (
            "sample-5",
            TransactionKind::Expense,
            435.0,
            "Coffee & Lunch",
            "Food & Dining",
            date!(2025 - 06 - 05),
            datetime!(2025-06-05 0:00 UTC),
        ),
        (
            "sample-6",
            TransactionKind::Income,
            6550.0,
            "other income",
            "Other Income",
            date!(2025 - 06 - 17),
            datetime!(2025-08-07 0:00 UTC),
        ),
        (
            "sample-7",
            TransactionKind::Income,
            2350.0,
            "Stock Dividend",
            "Investment",
            date!(2025 - 07 - 18),
            datetime!(2025-07-18 0:00 UTC),
        ),
        (
            "sample-8",
            TransactionKind::Expense,
            335.0,
            "movie",
            "Entertainment",
            date!(2025 - 07 - 25),
            datetime!(2025-07-25 0:00 UTC),
        ),
        (
            "sample-9",
            TransactionKind::Expense,
            3375.0,
            "Travel",
            "Travel",
            date!(2025 - 08 - 25),
            datetime!(2025-08-25 0:00 UTC),
        ),
    ]
    .into_iter()
    .map(
        |(id, kind, amount, description, category, occurred_at, recorded_at)| Transaction {
            id: id.to_owned(),
            kind,
            amount,
            description: description.to_owned(),
            category: category.to_owned(),
            occurred_at,
            recorded_at,
        },
    )
    .collect()
}
