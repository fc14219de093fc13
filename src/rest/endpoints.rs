//! Lunch Money REST API endpoint constants.

/// Base URL for the Lunch Money REST API.
pub const LUNCHMONEY_BASE_URL: &str = "https://dev.lunchmoney.app/";

/// Version 1 endpoints.
pub mod v1 {
    /// Current user.
    pub const ME: &str = "/v1/me";
    /// Categories (list, create).
    pub const CATEGORIES: &str = "/v1/categories";
    /// Tags.
    pub const TAGS: &str = "/v1/tags";
    /// Transactions (list, insert).
    pub const TRANSACTIONS: &str = "/v1/transactions";
    /// Budget summary.
    pub const BUDGETS: &str = "/v1/budgets";
    /// Recurring expenses.
    pub const RECURRING_EXPENSES: &str = "/v1/recurring_expenses";
    /// Manually-managed assets.
    pub const ASSETS: &str = "/v1/assets";
    /// Plaid-linked accounts.
    pub const PLAID_ACCOUNTS: &str = "/v1/plaid_accounts";

    /// Single category.
    pub fn category(id: i64) -> String {
        format!("{CATEGORIES}/{id}")
    }

    /// Single transaction.
    pub fn transaction(id: i64) -> String {
        format!("{TRANSACTIONS}/{id}")
    }
}
