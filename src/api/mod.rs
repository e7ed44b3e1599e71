//! Clients for the budget document and the login backend.

use async_trait::async_trait;

use crate::budget::BudgetData;
use crate::error::ApiError;

pub mod http;
pub mod sqlite;

pub use http::{Credentials, HttpClient};
pub use sqlite::SqliteClient;

/// Whole-document persistence. No partial updates: `save_budget` overwrites.
#[async_trait]
pub trait BudgetApi: Send + Sync {
    async fn get_budget(&self) -> Result<BudgetData, ApiError>;
    async fn save_budget(&self, data: &BudgetData) -> Result<(), ApiError>;
}
