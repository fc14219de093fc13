//! Types for the category endpoints.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::serde_helpers::empty_string_as_none;
use crate::validation::{Rules, Validate, ValidationErrors};

/// A single Lunch Money category.
///
/// Categories organize transactions and budgets. They can be grouped and
/// marked as income or excluded from budgets and totals.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    /// Unique identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub description: Option<String>,
    /// Whether this category represents income.
    #[serde(default)]
    pub is_income: bool,
    /// Whether this category is excluded from budget calculations.
    #[serde(default)]
    pub exclude_from_budget: bool,
    /// Whether this category is excluded from totals.
    #[serde(default)]
    pub exclude_from_totals: bool,
    /// Last modification time.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
    /// Creation time.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    /// Whether this category is a group of other categories.
    #[serde(default)]
    pub is_group: bool,
    /// The parent group, if any.
    #[serde(default)]
    pub group_id: Option<i64>,
}

/// Response from listing categories.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CategoriesResponse {
    pub categories: Vec<Category>,
}

/// Response from creating a category.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreateCategoryResponse {
    pub category_id: i64,
}

/// Request body for creating a category.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateCategoryRequest {
    /// Name of the new category. Must be non-empty.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Whether transactions in this category count as income.
    pub is_income: Option<bool>,
    /// Exclude from budget calculations.
    pub exclude_from_budget: Option<bool>,
    /// Exclude from totals.
    pub exclude_from_totals: Option<bool>,
    /// Group to assign the new category to.
    pub group_id: Option<i64>,
}

impl CreateCategoryRequest {
    /// Create a request for a category called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the category as income.
    pub fn income(mut self, is_income: bool) -> Self {
        self.is_income = Some(is_income);
        self
    }

    /// Assign the category to a group.
    pub fn group(mut self, group_id: i64) -> Self {
        self.group_id = Some(group_id);
        self
    }
}

impl Validate for CreateCategoryRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::new()
            .check("name", !self.name.trim().is_empty(), "name is required")
            .finish()
    }
}

/// Request body for updating a category. Only set fields are changed.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateCategoryRequest {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// Whether transactions in this category count as income.
    pub is_income: Option<bool>,
    /// Exclude from budget calculations.
    pub exclude_from_budget: Option<bool>,
    /// Exclude from totals.
    pub exclude_from_totals: Option<bool>,
    /// Move the category to another group.
    pub group_id: Option<i64>,
}

impl Validate for UpdateCategoryRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let name_ok = self.name.as_deref().is_none_or(|name| !name.trim().is_empty());
        Rules::new()
            .check("name", name_ok, "name must not be blank")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_deserialize_category() {
        let json = r#"{
            "id": 83,
            "name": "Groceries",
            "description": "Food and household items",
            "is_income": false,
            "exclude_from_budget": false,
            "exclude_from_totals": false,
            "updated_at": "2023-01-01T00:00:00Z",
            "created_at": "2023-01-01T00:00:00.000Z",
            "is_group": false,
            "group_id": null
        }"#;

        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.id, 83);
        assert_eq!(category.name, "Groceries");
        assert_eq!(category.description.as_deref(), Some("Food and household items"));
        assert_eq!(category.updated_at, Some(datetime!(2023-01-01 0:00 UTC)));
        assert_eq!(category.created_at, Some(datetime!(2023-01-01 0:00 UTC)));
        assert!(category.group_id.is_none());
    }

    #[test]
    fn test_deserialize_sparse_category() {
        let category: Category =
            serde_json::from_str(r#"{"id": 1, "name": "Misc", "description": ""}"#).unwrap();
        assert!(category.description.is_none());
        assert!(category.created_at.is_none());
        assert!(!category.is_group);
    }

    #[test]
    fn test_create_request_omits_unset_fields() {
        let request = CreateCategoryRequest::new("Coffee").income(false);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Coffee", "is_income": false}));
    }

    #[test]
    fn test_create_request_requires_name() {
        let err = CreateCategoryRequest::new("  ").validate().unwrap_err();
        assert!(err.has_field("name"));
    }

    #[test]
    fn test_update_request() {
        let request = UpdateCategoryRequest {
            exclude_from_totals: Some(true),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"exclude_from_totals":true}"#
        );

        let blank = UpdateCategoryRequest {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(blank.validate().is_err());
    }
}
