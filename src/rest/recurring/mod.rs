//! Recurring expense endpoint.

mod types;

pub use types::*;

use crate::error::LunchMoneyError;
use crate::rest::LunchMoneyClient;
use crate::rest::endpoints::v1;
use crate::types::query::optional_query;
use crate::validation::Rules;

impl LunchMoneyClient {
    /// Get recurring expenses, for the current month unless `filters` says
    /// otherwise.
    pub async fn get_recurring_expenses(
        &self,
        filters: Option<&RecurringExpenseFilters>,
    ) -> Result<Vec<RecurringExpense>, LunchMoneyError> {
        let query = optional_query(filters)?;
        let response: RecurringExpensesResponse = self
            .get_resource(
                v1::RECURRING_EXPENSES,
                &query,
                "get recurring expenses: decode response",
            )
            .await?;

        Rules::new()
            .each("recurring_expenses", &response.recurring_expenses)
            .finish()?;
        Ok(response.recurring_expenses)
    }
}
