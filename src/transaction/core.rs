//! Defines the core transaction model and the in-memory ledger that owns it.
//!
//! The [Ledger] is the only mutable collection in the application. Derived
//! views (filtering, summaries, time series) are pure functions over
//! [Ledger::transactions] and live in the sibling modules.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// The unique identifier of a [Transaction].
///
/// A hyphenated UUID string assigned by [Ledger::add]. IDs are opaque and
/// stable for the lifetime of the record.
pub type TransactionId = String;

/// Whether a transaction brought money in or sent money out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned, e.g. salary or a dividend.
    Income,
    /// Money spent, e.g. groceries or rent.
    Expense,
}

impl TransactionKind {
    /// The lowercase form used in URLs, form values, and the CSV export.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// The capitalised form for display.
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Records are immutable once created: edits replace the whole record via
/// [Ledger::update], carrying over the `id` and `recorded_at` of the original.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Whether this transaction is income or an expense.
    pub kind: TransactionKind,
    /// The amount of money spent or earned.
    ///
    /// Always a non-negative magnitude; the direction comes from `kind`.
    /// Sums over this field use plain `f64` arithmetic with no rounding,
    /// rounding to two decimal places happens only at display time.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The name of the category the transaction belongs to.
    ///
    /// Not checked against the category catalog, so it may name a category
    /// that no longer exists. Aggregations group by this name as-is.
    pub category: String,
    /// The calendar date the transaction is attributed to.
    ///
    /// This is the only field the bucketing engines look at, so the time of
    /// day a record was entered can never move it into an adjacent bucket.
    pub occurred_at: Date,
    /// When the record was created (UTC).
    ///
    /// Kept for auditing only, never used for bucketing, and preserved
    /// across updates.
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
}

/// The caller-supplied fields for a new transaction.
///
/// [Ledger::add] fills in the ID and creation timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    /// Whether the new transaction is income or an expense.
    pub kind: TransactionKind,
    /// The non-negative amount of money spent or earned.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The name of the category the transaction belongs to.
    pub category: String,
    /// The calendar date the transaction is attributed to.
    pub occurred_at: Date,
}

/// The result of [Ledger::update].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The stored record was replaced.
    Updated,
    /// No record with the given ID exists, nothing was changed.
    NotFound,
}

/// The result of [Ledger::delete].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The record was removed.
    Deleted,
    /// No record with the given ID exists, nothing was changed.
    NotFound,
}

/// The ordered, in-memory collection of transactions.
///
/// The ledger preserves insertion order: [Ledger::add] appends,
/// [Ledger::update] replaces in place, and [Ledger::delete] removes without
/// reordering the rest. Views that want a different order sort a copy, never
/// the ledger itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger holding `transactions` in the given order.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Add a new transaction to the end of the ledger.
    ///
    /// Assigns a fresh UUID and stamps `recorded_at` with the current UTC
    /// time, then returns a copy of the stored record. This never fails for
    /// well-typed input; amount and description validation belongs at the
    /// form boundary.
    pub fn add(&mut self, input: TransactionInput) -> Transaction {
        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            kind: input.kind,
            amount: input.amount,
            description: input.description,
            category: input.category,
            occurred_at: input.occurred_at,
            recorded_at: OffsetDateTime::now_utc(),
        };

        self.transactions.push(transaction.clone());

        transaction
    }

    /// Replace the stored record with the same ID as `transaction`.
    ///
    /// The record keeps its position in the ledger. Callers are expected to
    /// carry over the `id` and `recorded_at` of the record they are editing.
    ///
    /// Returns [UpdateOutcome::NotFound] if no record matches, so callers can
    /// detect stale edits (e.g. the record was deleted in another tab).
    pub fn update(&mut self, transaction: Transaction) -> UpdateOutcome {
        match self
            .transactions
            .iter_mut()
            .find(|stored| stored.id == transaction.id)
        {
            Some(stored) => {
                *stored = transaction;
                UpdateOutcome::Updated
            }
            None => UpdateOutcome::NotFound,
        }
    }

    /// Remove the record with the given ID, keeping the rest in order.
    pub fn delete(&mut self, id: &str) -> DeleteOutcome {
        let length_before = self.transactions.len();
        self.transactions.retain(|stored| stored.id != id);

        if self.transactions.len() < length_before {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::NotFound
        }
    }

    /// Replace the entire collection, order as given.
    ///
    /// Used by the persistence layer to install the transaction list loaded
    /// from disk.
    pub fn replace_all(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }

    /// A snapshot of all transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Look up a transaction by its ID.
    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|stored| stored.id == id)
    }

    /// Whether the ledger holds no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
