//! Background saving of budget snapshots.
//!
//! Saves are neither queued nor merged. Submitting while a save is in flight
//! aborts the older task and starts a new one with the full snapshot, so the
//! last local write is the only one still running. A save that already
//! reached the backend before the abort is simply overwritten.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::BudgetApi;
use crate::budget::BudgetData;
use crate::error::ApiError;

pub struct Persister {
    api: Arc<dyn BudgetApi>,
    in_flight: Option<JoinHandle<Result<(), ApiError>>>,
}

impl Persister {
    pub fn new(api: Arc<dyn BudgetApi>) -> Self {
        Self { api, in_flight: None }
    }

    pub fn api(&self) -> &Arc<dyn BudgetApi> {
        &self.api
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn submit(&mut self, doc: BudgetData) {
        if let Some(older) = self.in_flight.take() {
            debug!("save already in flight, superseding it");
            older.abort();
        }
        let api = Arc::clone(&self.api);
        self.in_flight = Some(tokio::spawn(async move { api.save_budget(&doc).await }));
    }

    /// Result of the tracked save, once it has finished. Never blocks.
    pub async fn poll(&mut self) -> Option<Result<(), ApiError>> {
        if !self.in_flight.as_ref().is_some_and(|h| h.is_finished()) {
            return None;
        }
        self.flush().await
    }

    /// Waits for the tracked save, if any.
    pub async fn flush(&mut self) -> Option<Result<(), ApiError>> {
        let handle = self.in_flight.take()?;
        Some(handle.await.map_err(ApiError::from).and_then(|r| r))
    }
}
