//! Defines the route handler for the page that displays transactions as a table.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, endpoints};

use super::{
    Ledger, TransactionKind,
    query::{SortField, SortOrder, SortSpec, TransactionFilter, distinct_categories, filter_and_sort},
    summary::summarize,
    view::{TransactionRow, transactions_view},
};

/// The raw query parameters for the transactions page.
///
/// Everything is optional, and the filter form submits empty strings for
/// controls the user left alone. [normalize_query] turns these into a
/// [NormalizedQuery].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionsQueryParams {
    /// Keep only income or expense records.
    pub kind: Option<String>,
    /// Keep only records in this category.
    pub category: Option<String>,
    /// Case-insensitive search over descriptions and categories.
    pub search: Option<String>,
    /// The field to sort by.
    pub sort: Option<SortField>,
    /// The direction to sort in.
    pub order: Option<SortOrder>,
}

/// Internal, validated filter and sort selection after normalization.
///
/// This is the source of truth for behavior (defaults applied, empty strings
/// treated as inactive filters).
struct NormalizedQuery {
    /// The active filter criteria.
    filter: TransactionFilter,
    /// The active sort selection.
    sort: SortSpec,
}

/// URL encoding helper for transactions page query params.
///
/// This is used to build consistent links and redirect URLs from
/// already-normalized values. Inactive filters are left out of the query
/// string entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct TransactionsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<TransactionKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    search: String,
    sort: SortField,
    order: SortOrder,
}

impl TransactionsQuery {
    pub(crate) fn new(filter: &TransactionFilter, sort: SortSpec) -> Self {
        Self {
            kind: filter.kind,
            category: filter.category.clone(),
            search: filter.search.clone(),
            sort: sort.field,
            order: sort.order,
        }
    }

    fn from_normalized(options: &NormalizedQuery) -> Self {
        Self::new(&options.filter, options.sort)
    }

    pub(crate) fn kind(&self) -> Option<TransactionKind> {
        self.kind
    }

    pub(crate) fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub(crate) fn search(&self) -> &str {
        &self.search
    }

    pub(crate) fn sort_field(&self) -> SortField {
        self.sort
    }

    pub(crate) fn sort_order(&self) -> SortOrder {
        self.order
    }

    /// Whether any filter criterion is active.
    pub(crate) fn has_active_filters(&self) -> bool {
        self.kind.is_some() || self.category.is_some() || !self.search.is_empty()
    }

    /// The query for a click on a sort control.
    ///
    /// Clicking the active field flips its direction, clicking the other
    /// field selects it largest-first.
    pub(crate) fn with_sort(&self, field: SortField) -> Self {
        let order = if self.sort == field {
            self.order.toggled()
        } else {
            SortOrder::Descending
        };

        Self {
            sort: field,
            order,
            ..self.clone()
        }
    }

    /// The same sort selection with every filter cleared.
    pub(crate) fn without_filters(&self) -> Self {
        Self {
            kind: None,
            category: None,
            search: String::new(),
            sort: self.sort,
            order: self.order,
        }
    }

    pub(crate) fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(self)
            .inspect_err(|error| tracing::error!("Could not encode transactions query: {error}"))
            .unwrap_or_default()
    }

    pub(crate) fn to_url(&self, route: &str) -> String {
        format!("{route}?{}", self.to_query_string())
    }
}

enum QueryDecision {
    Redirect(String),
    Normalized(NormalizedQuery),
}

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The in-memory transaction ledger.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// Render an overview of the user's transactions.
///
/// Requests without an explicit sort selection are redirected to the same
/// URL with the default sort filled in, so every rendered page has a fully
/// specified, shareable address.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    Query(query_params): Query<TransactionsQueryParams>,
) -> Result<Response, Error> {
    let options = match normalize_query(query_params) {
        QueryDecision::Normalized(options) => options,
        QueryDecision::Redirect(redirect_url) => {
            return Ok(Redirect::to(&redirect_url).into_response());
        }
    };

    let ledger = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("Could not acquire ledger lock: {error}"))
        .map_err(|_| Error::LedgerLockError)?;

    let transactions = filter_and_sort(ledger.transactions(), &options.filter, options.sort);
    let summary = summarize(&transactions);
    let categories = distinct_categories(ledger.transactions());
    let has_any_transactions = !ledger.is_empty();

    let query = TransactionsQuery::from_normalized(&options);
    let redirect_param = build_redirect_param(&query.to_url(endpoints::TRANSACTIONS_VIEW));
    let rows = transactions
        .into_iter()
        .map(|transaction| TransactionRow::new(transaction, redirect_param.as_deref()))
        .collect::<Vec<_>>();

    Ok(transactions_view(&rows, &summary, &categories, &query, has_any_transactions).into_response())
}

fn build_redirect_param(redirect_url: &str) -> Option<String> {
    serde_urlencoded::to_string([("redirect_url", &redirect_url)])
        .inspect_err(|error| {
            tracing::error!(
                "Could not set redirect URL {redirect_url} due to encoding error: {error}"
            );
        })
        .ok()
}

fn normalize_query(query: TransactionsQueryParams) -> QueryDecision {
    let has_missing_params = query.sort.is_none() || query.order.is_none();
    let default_sort = SortSpec::default();
    let sort = SortSpec {
        field: query.sort.unwrap_or(default_sort.field),
        order: query.order.unwrap_or(default_sort.order),
    };
    let filter = TransactionFilter {
        kind: query.kind.as_deref().and_then(parse_kind),
        category: query.category.filter(|category| !category.is_empty()),
        search: query.search.unwrap_or_default(),
    };

    if has_missing_params {
        let redirect_url =
            TransactionsQuery::new(&filter, sort).to_url(endpoints::TRANSACTIONS_VIEW);
        return QueryDecision::Redirect(redirect_url);
    }

    QueryDecision::Normalized(NormalizedQuery { filter, sort })
}

/// Parse the kind filter value, treating empty and unknown values as "all".
fn parse_kind(value: &str) -> Option<TransactionKind> {
    match value {
        "income" => Some(TransactionKind::Income),
        "expense" => Some(TransactionKind::Expense),
        _ => None,
    }
}
