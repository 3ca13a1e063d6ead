//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard
//! - HTML view functions for rendering the dashboard UI
//! - The state type used by the handler

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use std::sync::{Arc, Mutex};
use time::Date;

use crate::{
    AppState, Error,
    dashboard::{
        cards::{quick_stats_view, summary_cards_view},
        charts::{
            DashboardChart, category_breakdown_chart, charts_script, charts_view,
            income_trend_chart, monthly_comparison_chart, spending_trend_chart,
        },
    },
    endpoints,
    html::{HeadElement, base, link},
    navigation::NavBar,
    timezone::current_local_date,
    transaction::{FinancialSummary, Ledger, Transaction, summarize},
};

/// The address the ECharts library is loaded from.
const ECHARTS_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The state needed for displaying the dashboard page.
///
/// Contains the shared ledger and timezone information required by the
/// dashboard handler.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The ledger holding the application's transactions.
    pub ledger: Arc<Mutex<Ledger>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display a page with an overview of the user's finances.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;

    let ledger = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("Could not acquire ledger lock: {error}"))
        .map_err(|_| Error::LedgerLockError)?;

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    if ledger.is_empty() {
        return Ok(dashboard_no_data_view(nav_bar).into_response());
    }

    let transactions = ledger.transactions();
    let summary = summarize(transactions);
    let charts = build_dashboard_charts(transactions, today);

    Ok(dashboard_view(nav_bar, &summary, &charts).into_response())
}

/// Creates the array of dashboard charts from transaction data.
///
/// Generates four charts: the monthly income vs expenses comparison, the
/// expense breakdown by category, the income trend and the spending trend.
/// The chart options are serialized to JSON for ECharts consumption.
///
/// # Arguments
/// * `transactions` - The transactions to chart
/// * `today` - The current date in the local timezone
///
/// # Returns
/// Array of four DashboardChart instances ready for rendering.
fn build_dashboard_charts(transactions: &[Transaction], today: Date) -> [DashboardChart; 4] {
    [
        DashboardChart {
            id: "monthly-comparison-chart",
            options: monthly_comparison_chart(transactions, today.year()).to_string(),
        },
        DashboardChart {
            id: "category-breakdown-chart",
            options: category_breakdown_chart(transactions).to_string(),
        },
        DashboardChart {
            id: "income-trend-chart",
            options: income_trend_chart(transactions, today).to_string(),
        },
        DashboardChart {
            id: "spending-trend-chart",
            options: spending_trend_chart(transactions, today).to_string(),
        },
    ]
}

/// Renders the dashboard page when no transaction data exists.
///
/// Displays a helpful message with a link to add a first transaction.
///
/// # Arguments
/// * `nav_bar` - Navigation bar component
fn dashboard_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "adding a transaction");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Charts will show up here once you add some transactions.
                You can start by " (new_transaction_link) "."
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// Renders the main dashboard page with summary cards, charts and quick stats.
///
/// # Arguments
/// * `nav_bar` - Navigation bar component
/// * `summary` - Financial summary computed over every transaction
/// * `charts` - Dashboard charts to display
fn dashboard_view(
    nav_bar: NavBar,
    summary: &FinancialSummary,
    charts: &[DashboardChart],
) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            header class="w-full mb-4"
            {
                h1 class="text-2xl font-bold" { "Financial Dashboard" }

                p class="text-gray-600 dark:text-gray-400" { "Overview of your financial health" }
            }

            (summary_cards_view(summary))

            (charts_view(charts))

            (quick_stats_view(summary))
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
        charts_script(charts),
    ];

    base("Dashboard", &scripts, &content)
}
