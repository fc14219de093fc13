//! Budget endpoint.

mod types;

pub use types::*;

use crate::error::LunchMoneyError;
use crate::rest::LunchMoneyClient;
use crate::rest::endpoints::v1;
use crate::types::query::optional_query;
use crate::validation::Rules;

impl LunchMoneyClient {
    /// Get budgets for the months in `filters`.
    ///
    /// The server requires a date range; calling without filters yields the
    /// server's error as [`LunchMoneyError::Api`].
    pub async fn get_budgets(
        &self,
        filters: Option<&BudgetFilters>,
    ) -> Result<Vec<Budget>, LunchMoneyError> {
        let query = optional_query(filters)?;
        let mut budgets: Vec<Budget> = self
            .get_resource(v1::BUDGETS, &query, "get budgets: decode response")
            .await?;

        budgets.iter_mut().for_each(Budget::fill_missing_months);
        Rules::new().each("budgets", &budgets).finish()?;
        Ok(budgets)
    }
}
