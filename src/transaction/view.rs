//! HTML rendering for the transactions page.

use axum::http::Uri;
use maud::{Markup, html};
use time::{Date, Month, format_description::BorrowedFormatItem, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    category::color_for,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_SECONDARY_STYLE, CATEGORY_BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, edit_delete_action_links,
        format_currency,
    },
    navigation::NavBar,
    transaction::{
        Transaction, TransactionKind,
        query::{SortField, SortOrder},
        summary::FinancialSummary,
    },
};

use super::transactions_page::TransactionsQuery;

/// The max number of graphemes to display in the transaction table rows before
/// truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

/// The style for the compact inputs and selects in the filter bar.
const FILTER_CONTROL_STYLE: &str = "rounded border border-gray-300 bg-white px-2 py-1.5 \
    text-sm text-gray-900 focus:border-blue-500 \
    dark:border-gray-600 dark:bg-gray-700 dark:text-white";

/// A transaction prepared for rendering, with its action URLs precomputed.
pub(crate) struct TransactionRow {
    pub(crate) transaction: Transaction,
    pub(crate) edit_url: String,
    pub(crate) delete_url: String,
}

impl TransactionRow {
    /// Build the row for `transaction`.
    ///
    /// `redirect_param` is appended to the edit link so that saving an edit
    /// returns the user to the view they came from.
    pub(crate) fn new(transaction: Transaction, redirect_param: Option<&str>) -> Self {
        let edit_endpoint = format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, &transaction.id);
        let edit_url = match redirect_param {
            Some(param) => format!("{edit_endpoint}?{param}"),
            None => edit_endpoint,
        };
        let delete_url = format_endpoint(endpoints::TRANSACTION, &transaction.id);

        Self {
            transaction,
            edit_url,
            delete_url,
        }
    }
}

fn amount_class(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "text-green-700 dark:text-green-300",
        TransactionKind::Expense => "text-red-700 dark:text-red-300",
    }
}

/// The display amount with an explicit sign, e.g. "+$1,234.56" or "-$45.67".
fn format_signed_amount(kind: TransactionKind, amount: f64) -> String {
    match kind {
        TransactionKind::Income => format!("+{}", format_currency(amount)),
        TransactionKind::Expense => format_currency(-amount),
    }
}

pub(crate) fn transactions_view(
    rows: &[TransactionRow],
    summary: &FinancialSummary,
    categories: &[String],
    query: &TransactionsQuery,
    has_any_transactions: bool,
) -> Markup {
    let create_transaction_route = Uri::from_static(endpoints::NEW_TRANSACTION_VIEW);
    let export_route = Uri::from_static(endpoints::EXPORT);
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let empty_hint = if query.has_active_filters() {
        "Try adjusting your search terms or filters."
    } else {
        "Start by adding your first transaction."
    };

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl" id="transactions-content"
            {
                header class="flex justify-between flex-wrap items-end gap-3"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    div class="flex items-center gap-4"
                    {
                        @if has_any_transactions {
                            a href=(export_route) class=(LINK_STYLE) { "Export CSV" }
                        }

                        a href=(create_transaction_route) class=(LINK_STYLE) { "New Transaction" }
                    }
                }

                section class="rounded bg-gray-50 dark:bg-gray-800 overflow-hidden"
                {
                    (filter_controls_html(categories, query))

                    div class="border-t border-gray-200 dark:border-gray-700" {}

                    (summary_stats_html(summary))

                    (sort_controls_html(rows.len(), query))

                    (transaction_cards_view(rows, empty_hint))

                    (transactions_table_view(rows, empty_hint))
                }
            }
        }
    };

    base("Transactions", &[], &content)
}

fn filter_controls_html(categories: &[String], query: &TransactionsQuery) -> Markup {
    let transactions_page_route = Uri::from_static(endpoints::TRANSACTIONS_VIEW);
    let clear_url = query.without_filters().to_url(transactions_page_route.path());
    let label_class = "text-xs font-semibold uppercase tracking-wide text-gray-500 dark:text-gray-400";

    html! {
        form method="get" action=(transactions_page_route) class="flex flex-wrap items-end gap-3 px-6 py-4"
        {
            div class="flex min-w-[12rem] flex-1 flex-col gap-1"
            {
                label for="search" class=(label_class) { "Search" }
                input
                    type="search"
                    name="search"
                    id="search"
                    placeholder="Search transactions..."
                    value=(query.search())
                    class=(FILTER_CONTROL_STYLE);
            }

            div class="flex flex-col gap-1"
            {
                label for="filter-kind" class=(label_class) { "Type" }
                select name="kind" id="filter-kind" class=(FILTER_CONTROL_STYLE)
                {
                    option value="" { "All Types" }

                    @if query.kind() == Some(TransactionKind::Income) {
                        option value="income" selected { "Income" }
                    } @else {
                        option value="income" { "Income" }
                    }

                    @if query.kind() == Some(TransactionKind::Expense) {
                        option value="expense" selected { "Expense" }
                    } @else {
                        option value="expense" { "Expense" }
                    }
                }
            }

            div class="flex flex-col gap-1"
            {
                label for="filter-category" class=(label_class) { "Category" }
                select name="category" id="filter-category" class=(FILTER_CONTROL_STYLE)
                {
                    option value="" { "All Categories" }

                    @for category in categories {
                        @if query.category() == Some(category.as_str()) {
                            option value=(category) selected { (category) }
                        } @else {
                            option value=(category) { (category) }
                        }
                    }
                }
            }

            input type="hidden" name="sort" value=(query.sort_field().as_query_value());
            input type="hidden" name="order" value=(query.sort_order().as_query_value());

            button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Apply Filters" }

            @if query.has_active_filters() {
                a href=(clear_url) class=(LINK_STYLE) { "Clear Filters" }
            }
        }
    }
}

fn summary_stats_html(summary: &FinancialSummary) -> Markup {
    html! {
        div class="grid grid-cols-1 gap-3 px-6 py-3 sm:grid-cols-3" data-summary-stats="true"
        {
            (stat_tile(
                "Total Transactions",
                summary.transaction_count.to_string(),
                "text-gray-900 dark:text-white",
            ))
            (stat_tile(
                "Total Income",
                format_currency(summary.total_income),
                "text-green-700 dark:text-green-300",
            ))
            (stat_tile(
                "Total Expenses",
                format_currency(summary.total_expenses),
                "text-red-700 dark:text-red-300",
            ))
        }
    }
}

fn stat_tile(label: &str, value: String, value_class: &'static str) -> Markup {
    html! {
        div class="rounded border border-gray-200 bg-white px-4 py-3 dark:border-gray-700 dark:bg-gray-900/30"
        {
            div class="text-xs font-semibold uppercase tracking-wide text-gray-500 dark:text-gray-400"
            { (label) }
            div class={ "mt-1 text-lg font-semibold tabular-nums " (value_class) }
            { (value) }
        }
    }
}

fn sort_controls_html(row_count: usize, query: &TransactionsQuery) -> Markup {
    html! {
        div class="flex flex-wrap items-center justify-between gap-3 px-6 py-2 text-sm text-gray-600 dark:text-gray-300"
        {
            div class="flex items-center gap-2"
            {
                span class="font-semibold text-gray-900 dark:text-white" { "Sort by:" }
                (sort_link(query, SortField::Date))
                (sort_link(query, SortField::Amount))
            }

            span data-sort-description="true" { (sort_description(row_count, query)) }
        }
    }
}

fn sort_link(query: &TransactionsQuery, field: SortField) -> Markup {
    let href = query.with_sort(field).to_url(endpoints::TRANSACTIONS_VIEW);
    let is_active = query.sort_field() == field;
    let class = if is_active {
        "inline-flex min-w-[5rem] items-center justify-center px-2 py-1 rounded bg-gray-200 dark:bg-gray-700 text-gray-900 dark:text-white"
    } else {
        "inline-flex min-w-[5rem] items-center justify-center px-2 py-1 rounded text-blue-600 hover:underline"
    };
    let arrow = is_active.then(|| match query.sort_order() {
        SortOrder::Descending => " ↓",
        SortOrder::Ascending => " ↑",
    });

    html! {
        a href=(href) role="button" class=(class)
        {
            (field.label())
            @if let Some(arrow) = arrow { (arrow) }
        }
    }
}

fn sort_description(count: usize, query: &TransactionsQuery) -> String {
    let noun = if count == 1 {
        "transaction"
    } else {
        "transactions"
    };
    let order_label = match (query.sort_field(), query.sort_order()) {
        (SortField::Date, SortOrder::Descending) => "date (newest first)",
        (SortField::Date, SortOrder::Ascending) => "date (oldest first)",
        (SortField::Amount, SortOrder::Descending) => "amount (highest first)",
        (SortField::Amount, SortOrder::Ascending) => "amount (lowest first)",
    };

    format!("Showing {count} {noun} sorted by {order_label}")
}

fn transactions_table_view(rows: &[TransactionRow], empty_hint: &str) -> Markup {
    html! {
        div class="hidden lg:block"
        {
            table class="w-full my-2 text-sm text-left rtl:text-right
                text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                        th scope="col" class="px-6 py-3 text-right" { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for row in rows {
                        (transaction_row_view(row))
                    }

                    @if rows.is_empty() {
                        tr
                        {
                            td
                                colspan="6"
                                data-empty-state="true"
                                class="px-6 py-8 text-center"
                            {
                                p class="font-medium text-gray-900 dark:text-white" { "No transactions found" }
                                p class="mt-1 text-sm" { (empty_hint) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn transaction_row_view(row: &TransactionRow) -> Markup {
    let transaction = &row.transaction;
    let amount_str = format_signed_amount(transaction.kind, transaction.amount);
    let amount_class = amount_class(transaction.kind);
    let (description, tooltip) = format_description(&transaction.description);
    let confirm_message = format!(
        "Are you sure you want to delete the transaction '{}'? This cannot be undone.",
        transaction.description
    );

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-row="true"
        {
            td class="px-6 py-4 whitespace-nowrap" { (date_time_label(transaction.occurred_at)) }
            td class=(TABLE_CELL_STYLE) title=[tooltip] { (description) }
            td class=(TABLE_CELL_STYLE) { (category_badge(&transaction.category)) }
            td class=(TABLE_CELL_STYLE) { (kind_label(transaction.kind)) }
            td class={ "px-6 py-4 text-right whitespace-nowrap tabular-nums " (amount_class) }
            { (amount_str) }
            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    (edit_delete_action_links(
                        &row.edit_url,
                        &row.delete_url,
                        &confirm_message,
                        "closest tr",
                        "delete",
                    ))
                }
            }
        }
    }
}

fn transaction_cards_view(rows: &[TransactionRow], empty_hint: &str) -> Markup {
    html! {
        div class="lg:hidden space-y-3 px-4 py-4"
        {
            @for row in rows {
                (transaction_card_row(row))
            }

            @if rows.is_empty() {
                div class="rounded-lg border border-dashed border-gray-300 bg-white px-4 py-6 text-center text-sm text-gray-500 dark:border-gray-700 dark:bg-gray-800 dark:text-gray-400"
                {
                    p class="font-medium" { "No transactions found" }
                    p class="mt-1" { (empty_hint) }
                }
            }
        }
    }
}

fn transaction_card_row(row: &TransactionRow) -> Markup {
    let transaction = &row.transaction;
    let amount_str = format_signed_amount(transaction.kind, transaction.amount);
    let amount_class = amount_class(transaction.kind);
    let description = transaction.description.as_str();
    let confirm_message = format!(
        "Are you sure you want to delete the transaction '{}'? This cannot be undone.",
        transaction.description
    );

    html! {
        div class="rounded border border-gray-200 bg-gray-50 px-3 py-3 shadow-sm dark:border-gray-700 dark:bg-gray-900/30"
            data-transaction-card="true"
        {
            div class="flex items-start justify-between gap-3"
            {
                div class="min-w-0 flex-1 truncate text-sm font-medium text-gray-900 dark:text-white"
                    title=(description)
                { (description) }
                div class={ "shrink-0 text-sm tabular-nums text-right whitespace-nowrap " (amount_class) }
                { (amount_str) }
            }

            div class="mt-3 flex items-center justify-between gap-3 border-t border-gray-200 pt-2 text-xs text-gray-500 dark:border-gray-700/80 dark:text-gray-400"
            {
                div class="flex items-center gap-2"
                {
                    (category_badge(&transaction.category))
                    (date_time_label(transaction.occurred_at))
                }

                div class="flex items-center gap-4 text-sm text-gray-900 dark:text-white"
                {
                    (edit_delete_action_links(
                        &row.edit_url,
                        &row.delete_url,
                        &confirm_message,
                        "closest [data-transaction-card='true']",
                        "delete",
                    ))
                }
            }
        }
    }
}

fn category_badge(category: &str) -> Markup {
    // Categories outside the catalog keep the badge's stock colors.
    let color_style = color_for(category).map(|color| format!("background-color: {color}; color: #FFFFFF"));

    html! {
        span class=(CATEGORY_BADGE_STYLE) style=[color_style] { (category) }
    }
}

fn kind_label(kind: TransactionKind) -> Markup {
    let class = match kind {
        TransactionKind::Income => {
            "text-xs font-semibold uppercase tracking-wide text-green-700 dark:text-green-300"
        }
        TransactionKind::Expense => {
            "text-xs font-semibold uppercase tracking-wide text-red-700 dark:text-red-300"
        }
    };

    html! {
        span class=(class) { (kind.label()) }
    }
}

fn format_date_label(date: Date) -> String {
    format!(
        "{} {:02}, {}",
        month_abbrev(date.month()),
        date.day(),
        date.year()
    )
}

fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

const DATE_ATTRIBUTE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month repr:numerical padding:zero]-[day padding:zero]");

fn date_datetime_attr(date: Date) -> String {
    date.format(DATE_ATTRIBUTE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

fn date_time_label(date: Date) -> Markup {
    let datetime = date_datetime_attr(date);
    let label = format_date_label(date);

    html! {
        time datetime=(datetime) { (label) }
    }
}

fn format_description(description: &str) -> (String, Option<&str>) {
    let description_length = description.graphemes(true).count();

    if description_length <= MAX_DESCRIPTION_GRAPHEMES {
        (description.to_owned(), None)
    } else {
        let truncated: String = description
            .graphemes(true)
            .take(MAX_DESCRIPTION_GRAPHEMES - 3)
            .collect();
        let truncated = truncated + "...";
        (truncated, Some(description))
    }
}
