//! The shared form fields and form payload for creating and editing transactions.

use maud::{Markup, PreEscaped, html};
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    category::names_for_kind,
    html::{
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, HeadElement,
    },
    transaction::{TransactionInput, TransactionKind},
};

/// The values to prefill the transaction form fields with.
pub struct TransactionFormDefaults<'a> {
    /// The kind whose radio button starts checked.
    pub kind: TransactionKind,
    /// The amount to prefill, or none for a blank input.
    pub amount: Option<f64>,
    /// The date to prefill the date input with.
    pub date: Date,
    /// The description to prefill, or none for a blank input.
    pub description: Option<&'a str>,
    /// The category to preselect, or none for the placeholder option.
    pub category: Option<&'a str>,
    /// The latest date the date input accepts.
    pub max_date: Date,
    /// Whether the amount input grabs focus on page load.
    pub autofocus_amount: bool,
}

/// Renders the form fields shared by the create and edit transaction pages.
///
/// The category dropdown is split into one select per transaction kind so the
/// options always match the checked kind radio. The inactive select is hidden
/// and disabled, so only the visible one is submitted. Pair this markup with
/// [category_toggle_script] so switching kinds swaps the selects.
pub fn transaction_form_fields(defaults: &TransactionFormDefaults<'_>) -> Markup {
    let is_expense = matches!(defaults.kind, TransactionKind::Expense);
    let amount_str = defaults.amount.map(|amount| format!("{amount:.2}"));
    let amount_placeholder = amount_str.as_deref().unwrap_or("0.01");
    let description_placeholder = defaults.description.unwrap_or("Description");

    html! {
        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Type" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                div class="flex items-center gap-3"
                {
                    input
                        name="kind"
                        id="transaction-kind-expense"
                        type="radio"
                        value="expense"
                        checked[is_expense]
                        required
                        tabindex="0"
                        class=(FORM_RADIO_INPUT_STYLE);

                    label
                        for="transaction-kind-expense"
                        class=(FORM_RADIO_LABEL_STYLE)
                    {
                        "Expense"
                    }
                }

                div class="flex items-center gap-3"
                {
                    input
                        name="kind"
                        id="transaction-kind-income"
                        type="radio"
                        value="income"
                        checked[!is_expense]
                        required
                        tabindex="0"
                        class=(FORM_RADIO_INPUT_STYLE);

                    label
                        for="transaction-kind-income"
                        class=(FORM_RADIO_LABEL_STYLE)
                    {
                        "Income"
                    }
                }
            }
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    placeholder=(amount_placeholder)
                    min="0.01"
                    required
                    value=[amount_str.as_deref()]
                    autofocus[defaults.autofocus_amount]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                max=(defaults.max_date)
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="description"
                class=(FORM_LABEL_STYLE)
            {
                "Description"
            }

            input
                name="description"
                id="description"
                type="text"
                placeholder=(description_placeholder)
                required
                value=[defaults.description]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        (category_select(TransactionKind::Expense, defaults, is_expense))
        (category_select(TransactionKind::Income, defaults, !is_expense))
    }
}

fn category_select(
    kind: TransactionKind,
    defaults: &TransactionFormDefaults<'_>,
    is_active: bool,
) -> Markup {
    let group_id = format!("category-{}-group", kind.as_str());
    let select_id = format!("category-{}", kind.as_str());
    let catalog_names = names_for_kind(kind);
    let selected = if is_active { defaults.category } else { None };
    // A transaction can reference a category that was since removed from the
    // catalog. Keep it selectable so editing does not silently change it.
    let orphaned =
        selected.filter(|category| !catalog_names.iter().any(|name| *name == *category));

    html! {
        div id=(group_id) class=[(!is_active).then_some("hidden")]
        {
            label
                for=(select_id)
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            select
                name="category"
                id=(select_id)
                required
                disabled[!is_active]
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" { "Select a category" }

                @for name in &catalog_names {
                    @if Some(*name) == selected {
                        option value=(name) selected { (name) }
                    } @else {
                        option value=(name) { (name) }
                    }
                }

                @if let Some(category) = orphaned {
                    option value=(category) selected { (category) }
                }
            }
        }
    }
}

/// The script that swaps the category dropdowns when the kind radio changes.
pub fn category_toggle_script() -> HeadElement {
    HeadElement::ScriptSource(PreEscaped(
        r#"document.addEventListener('DOMContentLoaded', function() {
    const groups = {
        income: document.getElementById('category-income-group'),
        expense: document.getElementById('category-expense-group'),
    };
    const update = (kind) => {
        for (const [name, group] of Object.entries(groups)) {
            const select = group.querySelector('select');
            if (name === kind) {
                group.classList.remove('hidden');
                select.disabled = false;
            } else {
                group.classList.add('hidden');
                select.disabled = true;
            }
        }
    };
    document.querySelectorAll('input[name="kind"]').forEach((radio) => {
        radio.addEventListener('change', () => update(radio.value));
    });
});"#
            .to_owned(),
    ))
}

/// The form data submitted when creating or editing a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// Whether the transaction is income or an expense.
    pub kind: TransactionKind,
    /// The value of the transaction in dollars.
    pub amount: f64,
    /// The date when the transaction occurred.
    pub date: Date,
    /// Text detailing the transaction.
    pub description: String,
    /// The category the transaction belongs to.
    pub category: String,
}

impl TransactionForm {
    /// Checks the form against the entry rules.
    ///
    /// The amount must be positive, the description and category non-blank
    /// and the date no later than `today`.
    pub fn validate(&self, today: Date) -> Result<(), Error> {
        if self.amount <= 0.0 {
            return Err(Error::NonPositiveAmount(self.amount));
        }

        if self.description.trim().is_empty() {
            return Err(Error::EmptyDescription);
        }

        if self.category.trim().is_empty() {
            return Err(Error::EmptyCategory);
        }

        if self.date > today {
            return Err(Error::FutureDate(self.date));
        }

        Ok(())
    }

    /// Converts the form into the input the ledger accepts.
    pub fn into_input(self) -> TransactionInput {
        TransactionInput {
            kind: self.kind,
            amount: self.amount,
            description: self.description.trim().to_owned(),
            category: self.category,
            occurred_at: self.date,
        }
    }
}

#[cfg(test)]
mod form_field_tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use super::{TransactionFormDefaults, transaction_form_fields};
    use crate::transaction::TransactionKind;

    fn render_fields(defaults: &TransactionFormDefaults) -> Html {
        let fields = transaction_form_fields(defaults);
        let markup = maud::html! { form { (fields) } };
        Html::parse_document(&markup.into_string())
    }

    fn defaults_for_kind(kind: TransactionKind) -> TransactionFormDefaults<'static> {
        TransactionFormDefaults {
            kind,
            amount: None,
            date: date!(2025 - 08 - 26),
            description: None,
            category: None,
            max_date: date!(2025 - 08 - 26),
            autofocus_amount: false,
        }
    }

    #[test]
    fn checks_radio_for_selected_kind() {
        let cases = [
            (TransactionKind::Expense, "expense"),
            (TransactionKind::Income, "income"),
        ];

        for (kind, expected) in cases {
            let html = render_fields(&defaults_for_kind(kind));
            assert_checked_value(&html, expected);
        }
    }

    #[test]
    fn only_the_selected_kinds_category_select_is_enabled() {
        let html = render_fields(&defaults_for_kind(TransactionKind::Expense));

        let selector = Selector::parse("select[name=category]").unwrap();
        let selects = html.select(&selector).collect::<Vec<_>>();
        assert_eq!(selects.len(), 2, "want 2 category selects");

        for select in selects {
            let id = select.value().attr("id").unwrap();
            let disabled = select.value().attr("disabled").is_some();

            match id {
                "category-expense" => assert!(!disabled, "expense select should be enabled"),
                "category-income" => assert!(disabled, "income select should be disabled"),
                other => panic!("unexpected select id {other}"),
            }
        }
    }

    #[test]
    fn category_options_follow_the_selected_kind() {
        let html = render_fields(&defaults_for_kind(TransactionKind::Income));

        let selector = Selector::parse("select#category-income option").unwrap();
        let options = html
            .select(&selector)
            .map(|option| option.text().collect::<String>())
            .collect::<Vec<_>>();

        assert_eq!(options[0], "Select a category");
        assert!(options.iter().any(|option| option == "Salary"));
        assert!(
            !options.iter().any(|option| option == "Travel"),
            "expense categories should not appear in the income select"
        );
    }

    #[test]
    fn preselects_the_default_category() {
        let mut defaults = defaults_for_kind(TransactionKind::Expense);
        defaults.category = Some("Travel");

        let html = render_fields(&defaults);

        let selector = Selector::parse("select#category-expense option[selected]").unwrap();
        let selected = html
            .select(&selector)
            .map(|option| option.text().collect::<String>())
            .collect::<Vec<_>>();

        assert_eq!(selected, ["Travel"]);
    }

    #[test]
    fn keeps_a_category_missing_from_the_catalog() {
        let mut defaults = defaults_for_kind(TransactionKind::Expense);
        defaults.category = Some("Pet Supplies");

        let html = render_fields(&defaults);

        let selector = Selector::parse("select#category-expense option[selected]").unwrap();
        let selected = html
            .select(&selector)
            .map(|option| option.text().collect::<String>())
            .collect::<Vec<_>>();

        assert_eq!(selected, ["Pet Supplies"]);
    }

    #[test]
    fn date_input_is_capped_at_max_date() {
        let mut defaults = defaults_for_kind(TransactionKind::Expense);
        defaults.date = date!(2025 - 08 - 20);
        defaults.max_date = date!(2025 - 08 - 26);

        let html = render_fields(&defaults);

        let selector = Selector::parse("input[type=date]").unwrap();
        let input = html.select(&selector).next().expect("no date input");
        assert_eq!(input.value().attr("max"), Some("2025-08-26"));
        assert_eq!(input.value().attr("value"), Some("2025-08-20"));
    }

    #[test]
    fn prefills_amount_with_two_decimal_places() {
        let mut defaults = defaults_for_kind(TransactionKind::Expense);
        defaults.amount = Some(12.3);

        let html = render_fields(&defaults);

        let selector = Selector::parse("input[name=amount]").unwrap();
        let input = html.select(&selector).next().expect("no amount input");
        assert_eq!(input.value().attr("value"), Some("12.30"));
    }

    #[track_caller]
    fn assert_checked_value(document: &Html, expected: &str) {
        let selector = Selector::parse("input[type=radio][name=kind]").unwrap();
        let inputs = document.select(&selector).collect::<Vec<_>>();
        assert_eq!(
            inputs.len(),
            2,
            "want 2 transaction kind inputs, got {}",
            inputs.len()
        );

        let checked = inputs
            .iter()
            .find(|input| input.value().attr("checked").is_some())
            .and_then(|input| input.value().attr("value"));
        assert_eq!(
            checked,
            Some(expected),
            "want checked transaction kind to be {expected}, got {checked:?}"
        );
    }
}
