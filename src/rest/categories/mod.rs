//! Category endpoints.

mod types;

pub use types::*;

use crate::error::LunchMoneyError;
use crate::rest::LunchMoneyClient;
use crate::rest::endpoints::v1;
use crate::types::QueryMap;
use crate::validation::Validate;

impl LunchMoneyClient {
    /// Get all categories, including category groups.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use lunchmoney_api_client::rest::LunchMoneyClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = LunchMoneyClient::new("access_token");
    ///     for category in client.get_categories().await? {
    ///         println!("{} (income: {})", category.name, category.is_income);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_categories(&self) -> Result<Vec<Category>, LunchMoneyError> {
        let response: CategoriesResponse = self
            .get_resource(v1::CATEGORIES, &QueryMap::new(), "get categories: decode response")
            .await?;
        Ok(response.categories)
    }

    /// Get a single category by id.
    pub async fn get_category(&self, id: i64) -> Result<Category, LunchMoneyError> {
        self.get_resource(&v1::category(id), &QueryMap::new(), "get category: decode response")
            .await
    }

    /// Create a category and return its id.
    pub async fn create_category(
        &self,
        request: &CreateCategoryRequest,
    ) -> Result<i64, LunchMoneyError> {
        request.validate()?;
        let response: CreateCategoryResponse = self
            .post_resource(v1::CATEGORIES, request, "create category: decode response")
            .await?;
        Ok(response.category_id)
    }

    /// Update a category. Returns the server's acknowledgement.
    pub async fn update_category(
        &self,
        id: i64,
        request: &UpdateCategoryRequest,
    ) -> Result<bool, LunchMoneyError> {
        request.validate()?;
        self.put_resource(&v1::category(id), request, "update category: decode response")
            .await
    }
}
