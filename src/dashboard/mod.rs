//! Dashboard module
//!
//! Provides an overview page showing summary cards, charts and quick stats
//! derived from the transaction ledger.

mod cards;
mod charts;
mod handlers;

pub use handlers::get_dashboard_page;
