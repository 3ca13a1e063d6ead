//! Headline aggregates over a transaction slice.
//!
//! [summarize] feeds the dashboard cards and the summary line above the
//! transactions table. Callers pass whatever slice they are looking at, so
//! the same function serves both the whole ledger and a filtered view.

use crate::transaction::{Transaction, TransactionKind};

/// The headline figures for a set of transactions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinancialSummary {
    /// The sum of all income amounts.
    pub total_income: f64,
    /// The sum of all expense amounts, as a positive magnitude.
    pub total_expenses: f64,
    /// Income minus expenses. Negative when spending exceeds earnings.
    pub net_amount: f64,
    /// How many transactions were aggregated, both kinds combined.
    pub transaction_count: usize,
    /// The expense category with the greatest summed amount, or `None` when
    /// there are no expenses. When categories tie, the one whose first
    /// transaction appears earliest in the input wins.
    pub top_expense_category: Option<String>,
}

/// Compute the headline figures for `transactions` in a single pass.
pub fn summarize(transactions: &[Transaction]) -> FinancialSummary {
    let mut total_income = 0.0;
    let mut total_expenses = 0.0;
    let mut expense_totals: Vec<(String, f64)> = Vec::new();

    for transaction in transactions {
        match transaction.kind {
            TransactionKind::Income => total_income += transaction.amount,
            TransactionKind::Expense => {
                total_expenses += transaction.amount;

                match expense_totals
                    .iter_mut()
                    .find(|(category, _)| *category == transaction.category)
                {
                    Some((_, total)) => *total += transaction.amount,
                    None => expense_totals.push((transaction.category.clone(), transaction.amount)),
                }
            }
        }
    }

    // Strictly-greater comparison so the first-seen category wins ties.
    let top_expense_category = expense_totals.first().map(|(category, total)| {
        let mut best_category = category;
        let mut best_total = *total;

        for (candidate, candidate_total) in expense_totals.iter().skip(1) {
            if *candidate_total > best_total {
                best_category = candidate;
                best_total = *candidate_total;
            }
        }

        best_category.clone()
    });

    FinancialSummary {
        total_income,
        total_expenses,
        net_amount: total_income - total_expenses,
        transaction_count: transactions.len(),
        top_expense_category,
    }
}

#[cfg(test)]
mod summarize_tests {
    use time::macros::{date, datetime};

    use crate::transaction::{Transaction, TransactionKind};

    use super::{FinancialSummary, summarize};

    fn create_test_transaction(kind: TransactionKind, amount: f64, category: &str) -> Transaction {
        Transaction {
            id: format!("{category}-{amount}"),
            kind,
            amount,
            description: "Test".to_owned(),
            category: category.to_owned(),
            occurred_at: date!(2025 - 04 - 01),
            recorded_at: datetime!(2025-04-01 12:00 UTC),
        }
    }

    #[test]
    fn empty_input_summarizes_to_zeroes() {
        let summary = summarize(&[]);

        assert_eq!(summary, FinancialSummary::default());
        assert_eq!(summary.top_expense_category, None);
    }

    #[test]
    fn totals_split_by_kind() {
        let transactions = [
            create_test_transaction(TransactionKind::Income, 5000.0, "Salary"),
            create_test_transaction(TransactionKind::Expense, 120.5, "Food & Dining"),
            create_test_transaction(TransactionKind::Income, 800.0, "Freelance"),
            create_test_transaction(TransactionKind::Expense, 45.0, "Transportation"),
        ];

        let summary = summarize(&transactions);

        assert_eq!(summary.total_income, 5800.0);
        assert_eq!(summary.total_expenses, 165.5);
        assert_eq!(summary.net_amount, 5800.0 - 165.5);
        assert_eq!(summary.transaction_count, 4);
    }

    #[test]
    fn reports_every_field_from_one_pass() {
        let transactions = [
            create_test_transaction(TransactionKind::Income, 1000.0, "Salary"),
            create_test_transaction(TransactionKind::Expense, 300.0, "Bills & Utilities"),
            create_test_transaction(TransactionKind::Expense, 200.0, "Bills & Utilities"),
        ];

        let summary = summarize(&transactions);

        assert_eq!(
            summary,
            FinancialSummary {
                total_income: 1000.0,
                total_expenses: 500.0,
                net_amount: 500.0,
                transaction_count: 3,
                top_expense_category: Some("Bills & Utilities".to_owned()),
            }
        );
    }

    #[test]
    fn net_amount_goes_negative_when_overspending() {
        let transactions = [
            create_test_transaction(TransactionKind::Income, 100.0, "Salary"),
            create_test_transaction(TransactionKind::Expense, 250.0, "Travel"),
        ];

        let summary = summarize(&transactions);

        assert_eq!(summary.net_amount, -150.0);
    }

    #[test]
    fn top_expense_category_sums_across_transactions() {
        let transactions = [
            create_test_transaction(TransactionKind::Expense, 60.0, "Food & Dining"),
            create_test_transaction(TransactionKind::Expense, 100.0, "Travel"),
            create_test_transaction(TransactionKind::Expense, 70.0, "Food & Dining"),
        ];

        let summary = summarize(&transactions);

        assert_eq!(summary.top_expense_category.as_deref(), Some("Food & Dining"));
    }

    #[test]
    fn top_expense_category_ignores_income() {
        let transactions = [
            create_test_transaction(TransactionKind::Income, 5000.0, "Salary"),
            create_test_transaction(TransactionKind::Expense, 45.0, "Transportation"),
        ];

        let summary = summarize(&transactions);

        assert_eq!(
            summary.top_expense_category.as_deref(),
            Some("Transportation")
        );
    }

    #[test]
    fn top_expense_category_is_none_without_expenses() {
        let transactions = [create_test_transaction(TransactionKind::Income, 5000.0, "Salary")];

        let summary = summarize(&transactions);

        assert_eq!(summary.top_expense_category, None);
    }

    #[test]
    fn tied_categories_resolve_to_first_seen() {
        let transactions = [
            create_test_transaction(TransactionKind::Expense, 50.0, "Entertainment"),
            create_test_transaction(TransactionKind::Expense, 50.0, "Shopping"),
        ];

        let summary = summarize(&transactions);

        assert_eq!(
            summary.top_expense_category.as_deref(),
            Some("Entertainment")
        );
    }
}
