//! Types for the budget endpoint.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::money::{CurrencyError, Money, parse_currency};
use crate::types::QueryFilter;
use crate::types::serde_helpers::{empty_string_as_none, null_as_default, number_or_string};
use crate::validation::{Rules, Validate, ValidationErrors};

/// A category's budget over a range of months.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Budget {
    /// Name of the category group, if the category is in one.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub category_group_name: Option<String>,
    /// Category id. `None` for the uncategorized row.
    #[serde(default)]
    pub category_id: Option<i64>,
    /// Category name.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub category_name: String,
    /// Budget data keyed by month (`YYYY-MM-DD`).
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub data: BTreeMap<String, BudgetData>,
    /// Whether the category is excluded from budgets.
    #[serde(default)]
    pub exclude_from_budget: bool,
    /// Whether the category is excluded from totals.
    #[serde(default)]
    pub exclude_from_totals: bool,
    /// Group this category belongs to.
    #[serde(default)]
    pub group_id: Option<i64>,
    /// Whether this row is a group with children.
    #[serde(default)]
    pub has_children: bool,
    /// Whether this row is a category group.
    #[serde(default)]
    pub is_group: bool,
    /// Whether the category is income.
    #[serde(default)]
    pub is_income: bool,
    /// Display order.
    #[serde(default)]
    pub order: i64,
    /// Recurring expenses counted against this budget.
    #[serde(default)]
    pub recurring: Option<BudgetRecurring>,
}

impl Budget {
    /// Fill an empty `budget_month` from the key it is stored under.
    ///
    /// The server sometimes omits the month inside the entry.
    pub fn fill_missing_months(&mut self) {
        for (month, data) in &mut self.data {
            if data.budget_month.is_empty() {
                data.budget_month.clone_from(month);
            }
        }
    }
}

impl Validate for Budget {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.data
            .iter()
            .fold(Rules::new(), |rules, (month, data)| {
                rules.nested(&format!("data[{month}]"), data)
            })
            .finish()
    }
}

/// One month of a category's budget.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BudgetData {
    /// The month, `YYYY-MM-DD` (first of the month).
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub budget_month: String,
    /// Budgeted amount in the account's primary currency.
    #[serde(default)]
    pub budget_to_base: Option<f64>,
    /// Budgeted amount in `budget_currency`, as text.
    #[serde(default, deserialize_with = "number_or_string::deserialize")]
    pub budget_amount: Option<String>,
    /// Currency of `budget_amount`.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub budget_currency: Option<String>,
    /// Amount spent in the account's primary currency.
    #[serde(default)]
    pub spending_to_base: Option<f64>,
    /// Number of transactions in the month.
    #[serde(default)]
    pub num_transactions: Option<i64>,
}

impl BudgetData {
    /// The budgeted amount as [`Money`].
    ///
    /// Fails if either the amount or the currency is missing.
    pub fn parsed_amount(&self) -> Result<Money, CurrencyError> {
        parse_currency(
            self.budget_amount.as_deref().unwrap_or_default(),
            self.budget_currency.as_deref().unwrap_or_default(),
        )
    }
}

impl Validate for BudgetData {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::new()
            .date("budget_month", &self.budget_month)
            .finish()
    }
}

/// Recurring expenses attached to a budget row.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BudgetRecurring {
    /// Sum in the account's primary currency.
    #[serde(default)]
    pub sum: f64,
    /// The individual items.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub list: Vec<BudgetRecurringItem>,
}

/// A recurring expense counted against a budget.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BudgetRecurringItem {
    /// Payee.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub payee: String,
    /// Amount as a decimal string.
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Amount in the account's primary currency.
    #[serde(default)]
    pub to_base: f64,
}

impl BudgetRecurringItem {
    /// The amount as [`Money`].
    pub fn parsed_amount(&self) -> Result<Money, CurrencyError> {
        parse_currency(&self.amount, &self.currency)
    }
}

/// Range of months to fetch budgets for. Both dates are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetFilters {
    /// First month, `YYYY-MM-DD`.
    pub start_date: String,
    /// Last month, `YYYY-MM-DD`.
    pub end_date: String,
}

impl BudgetFilters {
    /// Budgets from `start_date` to `end_date`.
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }
}

impl Validate for BudgetFilters {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::new()
            .date("start_date", &self.start_date)
            .date("end_date", &self.end_date)
            .finish()
    }
}

impl QueryFilter for BudgetFilters {}

#[cfg(test)]
mod tests {
    use super::*;

    const BUDGET_JSON: &str = r#"{
        "category_name": "Food",
        "category_id": 315,
        "category_group_name": null,
        "group_id": null,
        "is_group": true,
        "is_income": false,
        "exclude_from_budget": false,
        "exclude_from_totals": false,
        "order": 0,
        "data": {
            "2020-09-01": {
                "num_transactions": 4,
                "spending_to_base": 85.41,
                "budget_to_base": 150,
                "budget_amount": 150,
                "budget_currency": "usd",
                "budget_month": "2020-09-01"
            },
            "2020-10-01": {
                "num_transactions": 0,
                "budget_amount": "75.50",
                "budget_currency": "usd"
            }
        },
        "recurring": {
            "sum": 9.99,
            "list": [{"payee": "Streaming", "amount": "9.99", "currency": "usd", "to_base": 9.99}]
        }
    }"#;

    #[test]
    fn test_deserialize_budget() {
        let budget: Budget = serde_json::from_str(BUDGET_JSON).unwrap();
        assert_eq!(budget.category_id, Some(315));
        assert_eq!(budget.data.len(), 2);

        let september = &budget.data["2020-09-01"];
        assert_eq!(september.budget_amount.as_deref(), Some("150"));
        assert_eq!(september.parsed_amount().unwrap().minor_units(), 15000);

        let october = &budget.data["2020-10-01"];
        assert_eq!(october.budget_amount.as_deref(), Some("75.50"));
        assert_eq!(october.budget_month, "");

        let recurring = budget.recurring.as_ref().unwrap();
        assert_eq!(recurring.list[0].parsed_amount().unwrap().minor_units(), 999);
    }

    #[test]
    fn test_fill_missing_months_then_validate() {
        let mut budget: Budget = serde_json::from_str(BUDGET_JSON).unwrap();
        let err = budget.validate().unwrap_err();
        assert!(err.has_field("data[2020-10-01].budget_month"));

        budget.fill_missing_months();
        assert_eq!(budget.data["2020-10-01"].budget_month, "2020-10-01");
        assert!(budget.validate().is_ok());
    }

    #[test]
    fn test_missing_budget_currency() {
        let data = BudgetData {
            budget_month: "2020-09-01".to_string(),
            budget_amount: Some("10".to_string()),
            ..Default::default()
        };
        assert!(data.parsed_amount().is_err());
    }

    #[test]
    fn test_filters_require_both_dates() {
        let err = BudgetFilters::default().validate().unwrap_err();
        assert!(err.has_field("start_date"));
        assert!(err.has_field("end_date"));

        let filters = BudgetFilters::new("2020-09-01", "2020-10-31");
        let map = filters.to_query().unwrap();
        assert_eq!(map["start_date"], "2020-09-01");
        assert_eq!(map["end_date"], "2020-10-31");
        assert_eq!(BudgetFilters::from_map(&map).unwrap(), filters);
    }
}
