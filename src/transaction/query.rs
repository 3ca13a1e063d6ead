//! Pure filtering and sorting over transaction slices.
//!
//! The transactions page collects its criteria into a [TransactionFilter] and
//! a [SortSpec] and hands them to [filter_and_sort]. Nothing here mutates the
//! ledger, callers always get a sorted copy.

use serde::{Deserialize, Serialize};

use crate::transaction::{Transaction, TransactionKind};

/// Criteria for narrowing down a transaction list.
///
/// All active criteria must match for a transaction to be kept. A field left
/// at its default deactivates that criterion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// Keep only transactions of this kind, or all kinds when `None`.
    pub kind: Option<TransactionKind>,
    /// Keep only transactions whose category equals this name exactly
    /// (case-sensitive), or all categories when `None`.
    pub category: Option<String>,
    /// Keep only transactions whose description or category contains this
    /// text, compared case-insensitively. An empty string matches everything.
    pub search: String,
}

impl TransactionFilter {
    /// Whether `transaction` passes every active criterion.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(kind) = self.kind {
            if transaction.kind != kind {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if transaction.category != *category {
                return false;
            }
        }

        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let in_description = transaction.description.to_lowercase().contains(&needle);
            let in_category = transaction.category.to_lowercase().contains(&needle);

            if !in_description && !in_category {
                return false;
            }
        }

        true
    }
}

/// The transaction field to sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// Sort by the calendar date the transaction occurred.
    Date,
    /// Sort by the transaction amount.
    Amount,
}

impl SortField {
    /// The value used in query strings and form options.
    pub fn as_query_value(self) -> &'static str {
        match self {
            SortField::Date => "date",
            SortField::Amount => "amount",
        }
    }

    /// The human-readable name for select options.
    pub fn label(self) -> &'static str {
        match self {
            SortField::Date => "Date",
            SortField::Amount => "Amount",
        }
    }
}

/// The direction to sort in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Smallest (or earliest) first.
    #[serde(rename = "asc")]
    Ascending,
    /// Largest (or latest) first.
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    /// The value used in query strings and form options.
    pub fn as_query_value(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }

    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// The human-readable name for select options.
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Ascending => "Ascending",
            SortOrder::Descending => "Descending",
        }
    }
}

/// A sort field and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    /// The field to compare.
    pub field: SortField,
    /// The direction to sort in.
    pub order: SortOrder,
}

impl Default for SortSpec {
    /// Most recent transactions first.
    fn default() -> Self {
        Self {
            field: SortField::Date,
            order: SortOrder::Descending,
        }
    }
}

/// Filter `transactions` and return the matches sorted by `sort`.
///
/// The sort is stable, so transactions that compare equal (same date, or same
/// amount) keep their insertion order regardless of direction. Dates compare
/// as calendar dates and amounts by total order, so equal amounts never churn
/// between requests.
pub fn filter_and_sort(
    transactions: &[Transaction],
    filter: &TransactionFilter,
    sort: SortSpec,
) -> Vec<Transaction> {
    let mut results: Vec<Transaction> = transactions
        .iter()
        .filter(|transaction| filter.matches(transaction))
        .cloned()
        .collect();

    results.sort_by(|a, b| {
        let ordering = match sort.field {
            SortField::Date => a.occurred_at.cmp(&b.occurred_at),
            SortField::Amount => a.amount.total_cmp(&b.amount),
        };

        match sort.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });

    results
}

/// The category names present in `transactions`, sorted alphabetically.
///
/// Drives the category dropdown on the transactions page, so the options
/// cover exactly the categories the user has actually recorded.
pub fn distinct_categories(transactions: &[Transaction]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();

    for transaction in transactions {
        if !categories.contains(&transaction.category) {
            categories.push(transaction.category.clone());
        }
    }

    categories.sort();
    categories
}


#[cfg(test)]
mod sort_tests {
    use time::{
        Date,
        macros::{date, datetime},
    };

    use crate::transaction::{Transaction, TransactionKind};

    use super::{
        SortField, SortOrder, SortSpec, TransactionFilter, distinct_categories, filter_and_sort,
    };

    fn create_test_transaction(id: &str, occurred_at: Date, amount: f64) -> Transaction {
        Transaction {
            id: id.to_owned(),
            kind: TransactionKind::Expense,
            amount,
            description: "Test".to_owned(),
            category: "Food & Dining".to_owned(),
            occurred_at,
            recorded_at: datetime!(2025-04-01 12:00 UTC),
        }
    }

    fn sorted_ids(transactions: &[Transaction], sort: SortSpec) -> Vec<String> {
        filter_and_sort(transactions, &TransactionFilter::default(), sort)
            .into_iter()
            .map(|transaction| transaction.id)
            .collect()
    }

    #[test]
    fn sorts_by_date_ascending() {
        let transactions = [
            create_test_transaction("t1", date!(2025 - 04 - 15), 10.0),
            create_test_transaction("t2", date!(2025 - 04 - 01), 20.0),
            create_test_transaction("t3", date!(2025 - 04 - 30), 30.0),
        ];
        let sort = SortSpec {
            field: SortField::Date,
            order: SortOrder::Ascending,
        };

        assert_eq!(sorted_ids(&transactions, sort), ["t2", "t1", "t3"]);
    }

    #[test]
    fn sorts_by_date_descending_by_default() {
        let transactions = [
            create_test_transaction("t1", date!(2025 - 04 - 15), 10.0),
            create_test_transaction("t2", date!(2025 - 04 - 01), 20.0),
            create_test_transaction("t3", date!(2025 - 04 - 30), 30.0),
        ];

        assert_eq!(
            sorted_ids(&transactions, SortSpec::default()),
            ["t3", "t1", "t2"]
        );
    }

    #[test]
    fn sorts_by_amount_in_both_directions() {
        let transactions = [
            create_test_transaction("t1", date!(2025 - 04 - 01), 50.0),
            create_test_transaction("t2", date!(2025 - 04 - 01), 5.0),
            create_test_transaction("t3", date!(2025 - 04 - 01), 500.0),
        ];

        let ascending = SortSpec {
            field: SortField::Amount,
            order: SortOrder::Ascending,
        };
        assert_eq!(sorted_ids(&transactions, ascending), ["t2", "t1", "t3"]);

        let descending = SortSpec {
            field: SortField::Amount,
            order: SortOrder::Descending,
        };
        assert_eq!(sorted_ids(&transactions, descending), ["t3", "t1", "t2"]);
    }

    #[test]
    fn reapplying_the_same_query_leaves_the_view_unchanged() {
        let transactions = [
            create_test_transaction("t1", date!(2025 - 04 - 15), 50.0),
            create_test_transaction("t2", date!(2025 - 04 - 01), 10.0),
            create_test_transaction("t3", date!(2025 - 04 - 30), 200.0),
        ];
        let filter = TransactionFilter::default();
        let sort = SortSpec {
            field: SortField::Amount,
            order: SortOrder::Descending,
        };

        let once = filter_and_sort(&transactions, &filter, sort);
        let twice = filter_and_sort(&once, &filter, sort);

        assert_eq!(once, twice);
    }

    #[test]
    fn equal_dates_keep_insertion_order_in_both_directions() {
        let transactions = [
            create_test_transaction("t1", date!(2025 - 04 - 01), 10.0),
            create_test_transaction("t2", date!(2025 - 04 - 01), 20.0),
            create_test_transaction("t3", date!(2025 - 04 - 01), 30.0),
        ];

        let ascending = SortSpec {
            field: SortField::Date,
            order: SortOrder::Ascending,
        };
        assert_eq!(sorted_ids(&transactions, ascending), ["t1", "t2", "t3"]);

        let descending = SortSpec {
            field: SortField::Date,
            order: SortOrder::Descending,
        };
        assert_eq!(
            sorted_ids(&transactions, descending),
            ["t1", "t2", "t3"],
            "a descending sort must not reverse tied rows"
        );
    }

    #[test]
    fn equal_amounts_keep_insertion_order() {
        let transactions = [
            create_test_transaction("t1", date!(2025 - 04 - 03), 25.0),
            create_test_transaction("t2", date!(2025 - 04 - 01), 25.0),
            create_test_transaction("t3", date!(2025 - 04 - 02), 25.0),
        ];
        let sort = SortSpec {
            field: SortField::Amount,
            order: SortOrder::Descending,
        };

        assert_eq!(sorted_ids(&transactions, sort), ["t1", "t2", "t3"]);
    }

    #[test]
    fn empty_input_produces_empty_output() {
        assert!(
            filter_and_sort(&[], &TransactionFilter::default(), SortSpec::default()).is_empty()
        );
    }

    #[test]
    fn distinct_categories_are_deduplicated_and_sorted() {
        let mut transactions = vec![
            create_test_transaction("t1", date!(2025 - 04 - 01), 10.0),
            create_test_transaction("t2", date!(2025 - 04 - 02), 20.0),
            create_test_transaction("t3", date!(2025 - 04 - 03), 30.0),
        ];
        transactions[0].category = "Transportation".to_owned();
        transactions[1].category = "Food & Dining".to_owned();
        transactions[2].category = "Transportation".to_owned();

        assert_eq!(
            distinct_categories(&transactions),
            ["Food & Dining", "Transportation"]
        );
    }
}
