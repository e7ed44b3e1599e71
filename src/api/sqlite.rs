use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tracing::info;

use super::BudgetApi;
use crate::budget::BudgetData;
use crate::error::ApiError;

/// Keeps the budget document in a local SQLite file, one JSON row.
#[derive(Clone)]
pub struct SqliteClient {
    pool: Pool<Sqlite>,
}

impl SqliteClient {
    pub async fn connect(db_url: &str) -> Result<Self, ApiError> {
        let options = SqliteConnectOptions::from_str(db_url)?.create_if_missing(true);
        // one connection, so `sqlite::memory:` stays a single database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        info!(db_url, "local budget store ready");
        Ok(Self { pool })
    }
}

#[async_trait]
impl BudgetApi for SqliteClient {
    async fn get_budget(&self) -> Result<BudgetData, ApiError> {
        let doc: Option<String> =
            sqlx::query_scalar("SELECT document FROM budget_documents WHERE document_id = 1")
                .fetch_optional(&self.pool)
                .await?;

        match doc {
            Some(s) => Ok(serde_json::from_str(&s)?),
            None => Ok(BudgetData::default()),
        }
    }

    async fn save_budget(&self, data: &BudgetData) -> Result<(), ApiError> {
        let doc = serde_json::to_string(data)?;
        sqlx::query(
            r#"
            INSERT INTO budget_documents (document_id, document, updated_at)
            VALUES (1, ?, strftime('%Y-%m-%dT%H:%M:%SZ','now'))
            ON CONFLICT(document_id) DO UPDATE SET
              document   = excluded.document,
              updated_at = excluded.updated_at
            "#,
        )
        .bind(doc)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
