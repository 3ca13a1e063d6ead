//! The built-in category catalog offered by the transaction forms.

use crate::transaction::TransactionKind;

/// A named category with its display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// The category name stored on transactions.
    pub name: &'static str,
    /// The kind of transaction the category applies to.
    pub kind: TransactionKind,
    /// The hex color used to tint the category badge.
    pub color: &'static str,
}

/// The built-in categories, income first.
///
/// Transactions store the category name as plain text, so editing this list
/// leaves existing records untouched. Orphaned names still show up in the
/// transactions page filter, which offers the categories observed in the
/// ledger rather than this catalog.
pub const DEFAULT_CATEGORIES: [Category; 13] = [
    Category {
        name: "Salary",
        kind: TransactionKind::Income,
        color: "#10B981",
    },
    Category {
        name: "Freelance",
        kind: TransactionKind::Income,
        color: "#3B82F6",
    },
    Category {
        name: "Investment",
        kind: TransactionKind::Income,
        color: "#8B5CF6",
    },
    Category {
        name: "Other Income",
        kind: TransactionKind::Income,
        color: "#06B6D4",
    },
    Category {
        name: "Food & Dining",
        kind: TransactionKind::Expense,
        color: "#EF4444",
    },
    Category {
        name: "Transportation",
        kind: TransactionKind::Expense,
        color: "#F59E0B",
    },
    Category {
        name: "Shopping",
        kind: TransactionKind::Expense,
        color: "#EC4899",
    },
    Category {
        name: "Entertainment",
        kind: TransactionKind::Expense,
        color: "#8B5CF6",
    },
    Category {
        name: "Bills & Utilities",
        kind: TransactionKind::Expense,
        color: "#6B7280",
    },
    Category {
        name: "Healthcare",
        kind: TransactionKind::Expense,
        color: "#10B981",
    },
    Category {
        name: "Education",
        kind: TransactionKind::Expense,
        color: "#3B82F6",
    },
    Category {
        name: "Travel",
        kind: TransactionKind::Expense,
        color: "#06B6D4",
    },
    Category {
        name: "Other Expenses",
        kind: TransactionKind::Expense,
        color: "#6B7280",
    },
];

/// The names of the catalog categories applying to `kind`, in catalog order.
pub fn names_for_kind(kind: TransactionKind) -> Vec<&'static str> {
    DEFAULT_CATEGORIES
        .iter()
        .filter(|category| category.kind == kind)
        .map(|category| category.name)
        .collect()
}

/// The badge color for `category`, or `None` for names outside the catalog.
pub fn color_for(category: &str) -> Option<&'static str> {
    DEFAULT_CATEGORIES
        .iter()
        .find(|candidate| candidate.name == category)
        .map(|candidate| candidate.color)
}
