//! Card components for the dashboard summary row.
//!
//! Provides card-based summaries showing:
//! - Total income and total expenses
//! - Net amount, color coded by its sign
//! - Transaction count
//!
//! Also renders the quick stats strip shown below the charts.

use maud::{Markup, html};

use crate::{html::format_currency, transaction::FinancialSummary};

/// Renders the grid of headline figure cards at the top of the dashboard.
///
/// # Arguments
/// * `summary` - The financial summary to display
///
/// # Returns
/// Maud markup containing the summary card grid.
pub(super) fn summary_cards_view(summary: &FinancialSummary) -> Markup {
    let net_amount_style = if summary.net_amount >= 0.0 {
        "text-green-600 dark:text-green-500"
    } else {
        "text-red-600 dark:text-red-500"
    };

    html! {
        section class="w-full mx-auto mb-4" {
            div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4" {
                (summary_card(
                    "Total Income",
                    &format_currency(summary.total_income),
                    "text-green-600 dark:text-green-500",
                ))

                (summary_card(
                    "Total Expenses",
                    &format_currency(summary.total_expenses),
                    "text-red-600 dark:text-red-500",
                ))

                (summary_card(
                    "Net Amount",
                    &format_currency(summary.net_amount),
                    net_amount_style,
                ))

                (summary_card(
                    "Transactions",
                    &summary.transaction_count.to_string(),
                    "text-gray-900 dark:text-white",
                ))
            }
        }
    }
}

/// Renders a single headline figure card.
fn summary_card(label: &str, value: &str, value_style: &str) -> Markup {
    html! {
        div
            class="bg-white dark:bg-gray-800 border border-gray-200
                   dark:border-gray-700 rounded-lg p-4 shadow-md"
            data-summary-card="true"
        {
            h3 class="text-sm font-medium text-gray-600 dark:text-gray-400" {
                (label)
            }
            p class=(format!("text-2xl font-bold {value_style}")) {
                (value)
            }
        }
    }
}

/// Renders the quick stats strip below the charts.
///
/// Shows the top expense category, the average transaction size and the
/// total transaction count.
///
/// # Arguments
/// * `summary` - The financial summary to display
///
/// # Returns
/// Maud markup containing the quick stats strip.
pub(super) fn quick_stats_view(summary: &FinancialSummary) -> Markup {
    let top_expense_category = summary.top_expense_category.as_deref().unwrap_or("N/A");

    html! {
        div class="w-full bg-gray-50 dark:bg-gray-800 rounded-lg p-4 mb-8" {
            div class="grid grid-cols-1 sm:grid-cols-3 gap-4" {
                (quick_stat("Top Expense Category", top_expense_category))
                (quick_stat("Average Transaction", &format_currency(average_transaction(summary))))
                (quick_stat("Total Transactions", &summary.transaction_count.to_string()))
            }
        }
    }
}

/// Renders a single label and value pair in the quick stats strip.
fn quick_stat(label: &str, value: &str) -> Markup {
    html! {
        div class="flex flex-col items-center" data-quick-stat="true" {
            span class="text-sm text-gray-600 dark:text-gray-400" {
                (label)
            }
            span class="text-lg font-semibold" {
                (value)
            }
        }
    }
}

/// The mean size of a transaction, counting income and expenses alike.
fn average_transaction(summary: &FinancialSummary) -> f64 {
    if summary.transaction_count == 0 {
        return 0.0;
    }

    (summary.total_income + summary.total_expenses) / summary.transaction_count as f64
}
