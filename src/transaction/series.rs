//! Time-bucketed series derived from transaction slices.
//!
//! Each function materializes a fixed bucket range from calendar month or day
//! starts and folds transactions into it, so series lengths are deterministic
//! regardless of data:
//! - [category_breakdown]: expense totals per category (pie chart),
//! - [monthly_comparison]: income vs expenses per month of a year (bar chart),
//! - [spending_trend]: daily expense totals over a trailing day range (line),
//! - [income_trend]: monthly income totals over a trailing month range (line).
//!
//! Only [Transaction::occurred_at] decides bucket membership. The caller
//! supplies `today` so trailing ranges are reproducible in tests.

use time::{Date, Duration, Month};

use crate::transaction::{Transaction, TransactionKind};

/// The day range for the spending trend chart.
pub const DEFAULT_TREND_DAYS: u16 = 30;

/// The month range for the income trend chart.
pub const DEFAULT_TREND_MONTHS: u16 = 6;

/// One slice of the category breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    /// The expense category name.
    pub category: String,
    /// The summed expense amount for the category.
    pub total: f64,
}

/// One month of the income vs expenses comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBucket {
    /// The month abbreviation, e.g. "Jan".
    pub label: String,
    /// The summed income for the month.
    pub income: f64,
    /// The summed expenses for the month.
    pub expenses: f64,
}

/// One bucket of a single-valued series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    /// The bucket label, e.g. "04/15" or "Apr 2025".
    pub label: String,
    /// The summed amount for the bucket.
    pub total: f64,
}

/// Total expenses per category, in the order categories first appear.
///
/// Income transactions are ignored. There is no fixed universe of categories
/// to zero-fill, so the result holds only categories with at least one
/// expense; an input without expenses produces an empty series.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategorySlice> {
    let mut slices: Vec<CategorySlice> = Vec::new();

    for transaction in transactions {
        if transaction.kind != TransactionKind::Expense {
            continue;
        }

        match slices
            .iter_mut()
            .find(|slice| slice.category == transaction.category)
        {
            Some(slice) => slice.total += transaction.amount,
            None => slices.push(CategorySlice {
                category: transaction.category.clone(),
                total: transaction.amount,
            }),
        }
    }

    slices
}

/// Income and expense totals for each calendar month of `year`.
///
/// Always returns twelve buckets in calendar order, labelled "Jan" through
/// "Dec". A transaction lands in the bucket whose calendar month contains its
/// date, months are inclusive of their first and last day. Transactions
/// outside `year` are excluded.
pub fn monthly_comparison(transactions: &[Transaction], year: i32) -> Vec<MonthlyBucket> {
    let mut buckets: Vec<MonthlyBucket> = (1..=12)
        .map(|number| MonthlyBucket {
            label: month_abbrev(month_from_number(number)).to_owned(),
            income: 0.0,
            expenses: 0.0,
        })
        .collect();

    for transaction in transactions {
        if transaction.occurred_at.year() != year {
            continue;
        }

        let index = usize::from(month_number(transaction.occurred_at.month())) - 1;
        match transaction.kind {
            TransactionKind::Income => buckets[index].income += transaction.amount,
            TransactionKind::Expense => buckets[index].expenses += transaction.amount,
        }
    }

    buckets
}

/// Daily expense totals for the trailing `days` days ending at `today`.
///
/// Returns `days + 1` buckets, one per day from `today - days` through
/// `today` inclusive, in chronological order and labelled `MM/dd`. Days
/// without expenses hold zero, and expenses dated outside the range (in
/// either direction) are excluded.
pub fn spending_trend(transactions: &[Transaction], today: Date, days: u16) -> Vec<SeriesPoint> {
    let start = today - Duration::days(i64::from(days));

    let mut points: Vec<SeriesPoint> = (0..=i64::from(days))
        .map(|offset| SeriesPoint {
            label: format_day_label(start + Duration::days(offset)),
            total: 0.0,
        })
        .collect();

    for transaction in transactions {
        if transaction.kind != TransactionKind::Expense {
            continue;
        }

        if transaction.occurred_at < start || transaction.occurred_at > today {
            continue;
        }

        let index = (transaction.occurred_at - start).whole_days() as usize;
        points[index].total += transaction.amount;
    }

    points
}

/// Monthly income totals for the trailing `months` months ending at `today`.
///
/// Returns `months` buckets, one per calendar month from `months - 1` months
/// before the current month through the current month, in chronological
/// order and labelled "MMM yyyy" (e.g. "Apr 2025"). Months without income
/// hold zero.
///
/// Besides falling in a bucket month, income must also fall inside the
/// overall window from `months` calendar months before `today` through
/// `today` itself, so income dated later in the current month than `today`
/// is excluded. The window start clamps to the end of short months (one
/// month before March 31 is the last day of February).
pub fn income_trend(transactions: &[Transaction], today: Date, months: u16) -> Vec<SeriesPoint> {
    let window_start = months_before(today, months);

    let bucket_months: Vec<(i32, Month)> = (0..months)
        .rev()
        .map(|offset| shift_month(today.year(), today.month(), -i32::from(offset)))
        .collect();

    let mut points: Vec<SeriesPoint> = bucket_months
        .iter()
        .map(|&(year, month)| SeriesPoint {
            label: format!("{} {year}", month_abbrev(month)),
            total: 0.0,
        })
        .collect();

    for transaction in transactions {
        if transaction.kind != TransactionKind::Income {
            continue;
        }

        if transaction.occurred_at < window_start || transaction.occurred_at > today {
            continue;
        }

        let position = bucket_months.iter().position(|&(year, month)| {
            year == transaction.occurred_at.year() && month == transaction.occurred_at.month()
        });

        if let Some(index) = position {
            points[index].total += transaction.amount;
        }
    }

    points
}

/// The calendar month `offset` months from `year`/`month`. Negative offsets
/// go backwards, rolling over year boundaries as needed.
fn shift_month(year: i32, month: Month, offset: i32) -> (i32, Month) {
    let total = year * 12 + i32::from(month_number(month)) - 1 + offset;

    let shifted_year = total.div_euclid(12);
    let shifted_month = month_from_number((total.rem_euclid(12) + 1) as u8);

    (shifted_year, shifted_month)
}

/// The date `months` calendar months before `date`, with the day clamped to
/// the target month's length.
fn months_before(date: Date, months: u16) -> Date {
    let (year, month) = shift_month(date.year(), date.month(), -i32::from(months));
    let day = date.day().min(last_day_of_month(year, month));

    Date::from_calendar_date(year, month, day).expect("invalid clamped month date")
}

fn format_day_label(date: Date) -> String {
    format!("{:02}/{:02}", month_number(date.month()), date.day())
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn month_number(month: Month) -> u8 {
    match month {
        Month::January => 1,
        Month::February => 2,
        Month::March => 3,
        Month::April => 4,
        Month::May => 5,
        Month::June => 6,
        Month::July => 7,
        Month::August => 8,
        Month::September => 9,
        Month::October => 10,
        Month::November => 11,
        Month::December => 12,
    }
}

fn month_from_number(month: u8) -> Month {
    match month {
        1 => Month::January,
        2 => Month::February,
        3 => Month::March,
        4 => Month::April,
        5 => Month::May,
        6 => Month::June,
        7 => Month::July,
        8 => Month::August,
        9 => Month::September,
        10 => Month::October,
        11 => Month::November,
        12 => Month::December,
        _ => panic!("invalid month number {month}"),
    }
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

#[cfg(test)]
fn create_test_transaction(kind: TransactionKind, amount: f64, occurred_at: Date) -> Transaction {
    Transaction {
        id: format!("{}-{amount}-{occurred_at}", kind.as_str()),
        kind,
        amount,
        description: "Test".to_owned(),
        category: "Test".to_owned(),
        occurred_at,
        recorded_at: time::macros::datetime!(2025-04-01 12:00 UTC),
    }
}


#[cfg(test)]
mod monthly_comparison_tests {
    use time::macros::date;

    use crate::transaction::TransactionKind;

    use super::{create_test_transaction, monthly_comparison};

    #[test]
    fn always_produces_twelve_buckets_in_calendar_order() {
        let buckets = monthly_comparison(&[], 2025);

        let labels: Vec<&str> = buckets.iter().map(|bucket| bucket.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]
        );
        assert!(
            buckets
                .iter()
                .all(|bucket| bucket.income == 0.0 && bucket.expenses == 0.0)
        );
    }

    #[test]
    fn splits_each_month_into_income_and_expenses() {
        let transactions = [
            create_test_transaction(TransactionKind::Income, 1000.0, date!(2025 - 01 - 15)),
            create_test_transaction(TransactionKind::Expense, 300.0, date!(2025 - 01 - 20)),
            create_test_transaction(TransactionKind::Expense, 200.0, date!(2025 - 02 - 10)),
        ];

        let buckets = monthly_comparison(&transactions, 2025);

        assert_eq!(buckets[0].income, 1000.0);
        assert_eq!(buckets[0].expenses, 300.0);
        assert_eq!(buckets[1].income, 0.0);
        assert_eq!(buckets[1].expenses, 200.0);
        for bucket in &buckets[2..] {
            assert_eq!(bucket.income, 0.0);
            assert_eq!(bucket.expenses, 0.0);
        }
    }

    #[test]
    fn includes_first_and_last_day_of_a_month() {
        let transactions = [
            create_test_transaction(TransactionKind::Expense, 10.0, date!(2025 - 01 - 01)),
            create_test_transaction(TransactionKind::Expense, 20.0, date!(2025 - 01 - 31)),
        ];

        let buckets = monthly_comparison(&transactions, 2025);

        assert_eq!(buckets[0].expenses, 30.0);
    }

    #[test]
    fn excludes_other_years() {
        let transactions = [
            create_test_transaction(TransactionKind::Expense, 10.0, date!(2024 - 12 - 31)),
            create_test_transaction(TransactionKind::Expense, 20.0, date!(2026 - 01 - 01)),
            create_test_transaction(TransactionKind::Expense, 40.0, date!(2025 - 06 - 15)),
        ];

        let buckets = monthly_comparison(&transactions, 2025);

        let total: f64 = buckets.iter().map(|bucket| bucket.expenses).sum();
        assert_eq!(total, 40.0);
        assert_eq!(buckets[5].expenses, 40.0);
    }
}
