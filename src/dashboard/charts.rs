//! Chart generation and rendering for the dashboard.
//!
//! This module creates interactive ECharts visualizations for financial data:
//! - **Monthly Comparison Chart**: Income vs expense totals for each month of the year
//! - **Category Breakdown Chart**: Pie chart of expense totals grouped by category
//! - **Income Trend Chart**: Monthly income totals over the last six months
//! - **Spending Trend Chart**: Daily expense totals over the last thirty days
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    datatype::DataPointItem,
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, EmphasisFocus, ItemStyle,
        JsFunction, LineStyle, Tooltip, Trigger,
    },
    series::{Line, Pie, bar},
};
use maud::{Markup, PreEscaped, html};
use time::Date;

use crate::{
    category::color_for,
    html::HeadElement,
    transaction::{
        DEFAULT_TREND_DAYS, DEFAULT_TREND_MONTHS, Transaction, category_breakdown, income_trend,
        monthly_comparison, spending_trend,
    },
};

/// The series color for income values.
const INCOME_COLOR: &str = "#10B981";

/// The series color for expense values.
const EXPENSE_COLOR: &str = "#EF4444";

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
///
/// # Arguments
/// * `charts` - The charts to render containers for
///
/// # Returns
/// Maud markup containing a grid of chart container divs.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
///
/// # Arguments
/// * `charts` - The charts to generate initialization scripts for
///
/// # Returns
/// HeadElement containing the initialization JavaScript.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

pub(super) fn monthly_comparison_chart(transactions: &[Transaction], year: i32) -> Chart {
    let buckets = monthly_comparison(transactions, year);
    let labels: Vec<String> = buckets.iter().map(|bucket| bucket.label.clone()).collect();
    let income: Vec<f64> = buckets.iter().map(|bucket| bucket.income).collect();
    let expenses: Vec<f64> = buckets.iter().map(|bucket| bucket.expenses).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Monthly Income vs Expenses")
                .subtext(year.to_string())
                .left(20)
                .top("1%"),
        )
        .tooltip(currency_tooltip())
        .legend(Legend::new().left(300).top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(90)
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            bar::Bar::new()
                .name("Income")
                .item_style(ItemStyle::new().color(INCOME_COLOR))
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(income),
        )
        .series(
            bar::Bar::new()
                .name("Expenses")
                .item_style(ItemStyle::new().color(EXPENSE_COLOR))
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(expenses),
        )
}

pub(super) fn category_breakdown_chart(transactions: &[Transaction]) -> Chart {
    let slices = category_breakdown(transactions);

    let items: Vec<DataPointItem> = slices
        .iter()
        .map(|slice| {
            let item = DataPointItem::new(slice.total).name(slice.category.as_str());

            // Categories outside the catalog keep the palette colors.
            match color_for(&slice.category) {
                Some(color) => item.item_style(ItemStyle::new().color(color)),
                None => item,
            }
        })
        .collect();

    Chart::new()
        .title(Title::new().text("Expenses by Category").left(20).top("1%"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().top("bottom"))
        .series(Pie::new().name("Expenses").radius("60%").data(items))
}

pub(super) fn income_trend_chart(transactions: &[Transaction], today: Date) -> Chart {
    let points = income_trend(transactions, today, DEFAULT_TREND_MONTHS);
    let labels: Vec<String> = points.iter().map(|point| point.label.clone()).collect();
    let values: Vec<f64> = points.iter().map(|point| point.total).collect();

    Chart::new()
        .title(Title::new().text("Income Trend").subtext("Last six months"))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            Line::new()
                .name("Monthly Income")
                .item_style(ItemStyle::new().color(INCOME_COLOR))
                .line_style(LineStyle::new().color(INCOME_COLOR).width(2.0))
                .data(values),
        )
}

pub(super) fn spending_trend_chart(transactions: &[Transaction], today: Date) -> Chart {
    let points = spending_trend(transactions, today, DEFAULT_TREND_DAYS);
    let labels: Vec<String> = points.iter().map(|point| point.label.clone()).collect();
    let values: Vec<f64> = points.iter().map(|point| point.total).collect();

    Chart::new()
        .title(Title::new().text("Spending Trend").subtext("Last thirty days"))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            Line::new()
                .name("Daily Expenses")
                .item_style(ItemStyle::new().color(EXPENSE_COLOR))
                .line_style(LineStyle::new().color(EXPENSE_COLOR).width(2.0))
                .data(values),
        )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
