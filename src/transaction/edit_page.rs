//! Defines the page for editing an existing transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, Query, State},
    response::{IntoResponse, Response},
};
use maud::html;
use serde::Deserialize;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, dollar_input_styles, loading_spinner},
    not_found::get_404_not_found_response,
    timezone::current_local_date,
    transaction::{
        Ledger,
        form::{TransactionFormDefaults, category_toggle_script, transaction_form_fields},
    },
};

/// The query parameters for the edit transaction page.
#[derive(Debug, Deserialize)]
pub struct QueryParams {
    /// The URL to redirect to after the edit is saved.
    pub redirect_url: Option<String>,
}

/// The state needed for the edit transaction page.
#[derive(Debug, Clone)]
pub struct EditTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The in-memory transaction ledger.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for EditTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            ledger: state.ledger.clone(),
        }
    }
}

/// Renders the page for editing a transaction.
///
/// Returns the 404 page when no transaction with the given ID exists.
pub async fn get_edit_transaction_page(
    State(state): State<EditTransactionPageState>,
    Path(transaction_id): Path<String>,
    Query(query_params): Query<QueryParams>,
) -> Response {
    let max_date = match current_local_date(&state.local_timezone) {
        Ok(date) => date,
        Err(error) => return error.into_response(),
    };

    let ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("Could not acquire ledger lock: {error}");
            return Error::LedgerLockError.into_response();
        }
    };

    let transaction = match ledger.get(&transaction_id) {
        Some(transaction) => transaction,
        None => return get_404_not_found_response(),
    };

    let defaults = TransactionFormDefaults {
        kind: transaction.kind,
        amount: Some(transaction.amount),
        date: transaction.occurred_at,
        description: Some(&transaction.description),
        category: Some(&transaction.category),
        max_date,
        autofocus_amount: false,
    };
    let put_url = put_endpoint_url(&transaction_id, query_params.redirect_url.as_deref());

    let content = html! {
        div class="flex flex-col items-center justify-center gap-4 pt-4" {
            form
                class=(FORM_CONTAINER_STYLE)
                hx-put=(put_url)
                hx-target-error="#alert-container"
            {
                h2 class="text-xl font-bold dark:text-white" { "Edit Transaction" }
                (transaction_form_fields(&defaults))
                button type="submit" id="submit-button" class=(BUTTON_PRIMARY_STYLE) {
                    span class="htmx-indicator" { (loading_spinner()) }
                    " Save Changes"
                }
            }
        }
    };

    base(
        "Edit Transaction",
        &[dollar_input_styles(), category_toggle_script()],
        &content,
    )
    .into_response()
}

/// The URL the edit form submits to.
///
/// Carries `redirect_url` through to the update endpoint so that saving
/// returns the user to the view they came from.
fn put_endpoint_url(transaction_id: &str, redirect_url: Option<&str>) -> String {
    let endpoint = format_endpoint(endpoints::TRANSACTION, transaction_id);

    let query = redirect_url.and_then(|url| {
        serde_urlencoded::to_string([("redirect_url", url)])
            .inspect_err(|error| tracing::error!("Could not encode redirect URL: {error}"))
            .ok()
    });

    match query {
        Some(query) => format!("{endpoint}?{query}"),
        None => endpoint,
    }
}

#[cfg(test)]
mod edit_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, Query, State},
        http::StatusCode,
    };
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::transaction::{
        Ledger, Transaction, TransactionInput, TransactionKind,
        edit_page::{
            EditTransactionPageState, QueryParams, get_edit_transaction_page, put_endpoint_url,
        },
    };

    fn create_test_state() -> (EditTransactionPageState, Transaction) {
        let mut ledger = Ledger::new();
        let transaction = ledger.add(TransactionInput {
            kind: TransactionKind::Expense,
            amount: 45.67,
            description: "Weekly groceries".to_owned(),
            category: "Food & Dining".to_owned(),
            occurred_at: date!(2025 - 06 - 15),
        });
        let state = EditTransactionPageState {
            local_timezone: "Etc/UTC".to_owned(),
            ledger: Arc::new(Mutex::new(ledger)),
        };

        (state, transaction)
    }

    #[tokio::test]
    async fn edit_page_prefills_the_stored_transaction() {
        let (state, transaction) = create_test_state();

        let response = get_edit_transaction_page(
            State(state),
            Path(transaction.id.clone()),
            Query(QueryParams { redirect_url: None }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html(response).await;
        assert_form_targets(&html, &format!("/api/transactions/{}", transaction.id));
        assert_input_value(&html, "amount", "45.67");
        assert_input_value(&html, "date", "2025-06-15");
        assert_input_value(&html, "description", "Weekly groceries");
        assert_selected_category(&html, "Food & Dining");
    }

    #[tokio::test]
    async fn edit_page_returns_not_found_for_unknown_id() {
        let (state, _) = create_test_state();

        let response = get_edit_transaction_page(
            State(state),
            Path("no-such-id".to_owned()),
            Query(QueryParams { redirect_url: None }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn edit_page_carries_redirect_url_to_the_form_target() {
        let (state, transaction) = create_test_state();
        let redirect_url = "/transactions?sort=amount&order=asc".to_owned();

        let response = get_edit_transaction_page(
            State(state),
            Path(transaction.id.clone()),
            Query(QueryParams {
                redirect_url: Some(redirect_url),
            }),
        )
        .await;

        let html = parse_html(response).await;
        assert_form_targets(
            &html,
            &format!(
                "/api/transactions/{}?redirect_url=%2Ftransactions%3Fsort%3Damount%26order%3Dasc",
                transaction.id
            ),
        );
    }

    #[test]
    fn put_endpoint_url_without_redirect_is_bare() {
        assert_eq!(
            put_endpoint_url("abc", None),
            "/api/transactions/abc".to_owned()
        );
    }

    async fn parse_html(response: axum::response::Response) -> Html {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("could not get response body");
        let text = String::from_utf8_lossy(&body);

        Html::parse_document(&text)
    }

    #[track_caller]
    fn assert_form_targets(html: &Html, want_url: &str) {
        let form_selector = Selector::parse(&format!("form[hx-put=\"{want_url}\"]"))
            .expect("could not parse selector");
        assert!(
            html.select(&form_selector).next().is_some(),
            "could not find form with hx-put=\"{want_url}\""
        );
    }

    #[track_caller]
    fn assert_input_value(html: &Html, name: &str, want_value: &str) {
        let selector =
            Selector::parse(&format!("input[name={name}]")).expect("could not parse selector");
        let input = html
            .select(&selector)
            .next()
            .unwrap_or_else(|| panic!("could not find input with name {name}"));
        assert_eq!(input.attr("value"), Some(want_value));
    }

    #[track_caller]
    fn assert_selected_category(html: &Html, want_category: &str) {
        let selector = Selector::parse("option[selected]").expect("could not parse selector");
        let selected: Vec<String> = html
            .select(&selector)
            .map(|option| option.text().collect())
            .collect();
        assert!(
            selected.iter().any(|text| text == want_category),
            "expected {want_category} to be selected, got {selected:?}"
        );
    }
}
