//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the in-memory `Ledger` that owns it
//! - Pure functions for filtering, sorting, summarizing, and bucketing
//! - View handlers for transaction-related web pages and endpoints

mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod export_endpoint;
mod form;
mod query;
mod series;
mod summary;
mod transactions_page;
mod view;

pub use core::{
    DeleteOutcome, Ledger, Transaction, TransactionId, TransactionInput, TransactionKind,
    UpdateOutcome,
};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_create_transaction_page;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use edit_page::get_edit_transaction_page;
pub use export_endpoint::export_transactions_endpoint;
pub use query::{
    SortField, SortOrder, SortSpec, TransactionFilter, distinct_categories, filter_and_sort,
};
pub use series::{
    CategorySlice, DEFAULT_TREND_DAYS, DEFAULT_TREND_MONTHS, MonthlyBucket, SeriesPoint,
    category_breakdown, income_trend, monthly_comparison, spending_trend,
};
pub use summary::{FinancialSummary, summarize};
pub use transactions_page::get_transactions_page;
