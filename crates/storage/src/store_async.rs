//! Async `JournalStore` implementation for SQLite `Storage` via `spawn_blocking`.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use storynest_core::{
    Child, JournalStore, Memory, NewMemory, QuotaDecision, UsagePeriod,
};

use crate::Storage;

/// Helper: run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking join error: {e}"))?
}

#[async_trait]
impl JournalStore for Storage {
    async fn lookup_token(&self, token: &str) -> Result<Option<String>> {
        let s = self.clone();
        let token = token.to_owned();
        blocking(move || s.lookup_token(&token)).await
    }

    async fn grant_token(&self, user_id: &str, token: &str) -> Result<()> {
        let s = self.clone();
        let user_id = user_id.to_owned();
        let token = token.to_owned();
        blocking(move || s.grant_token(&user_id, &token)).await
    }

    async fn reserve_call(
        &self,
        user_id: &str,
        period_start: DateTime<Utc>,
        quota: u32,
    ) -> Result<QuotaDecision> {
        let s = self.clone();
        let user_id = user_id.to_owned();
        blocking(move || s.reserve_call(&user_id, period_start, quota)).await
    }

    async fn release_call(&self, user_id: &str, period_start: DateTime<Utc>) -> Result<()> {
        let s = self.clone();
        let user_id = user_id.to_owned();
        blocking(move || s.release_call(&user_id, period_start)).await
    }

    async fn get_usage(
        &self,
        user_id: &str,
        period_start: DateTime<Utc>,
    ) -> Result<Option<UsagePeriod>> {
        let s = self.clone();
        let user_id = user_id.to_owned();
        blocking(move || s.get_usage(&user_id, period_start)).await
    }

    async fn get_child(&self, id: i64) -> Result<Option<Child>> {
        let s = self.clone();
        blocking(move || s.get_child(id)).await
    }

    async fn list_children(&self, user_id: &str) -> Result<Vec<Child>> {
        let s = self.clone();
        let user_id = user_id.to_owned();
        blocking(move || s.list_children(&user_id)).await
    }

    async fn add_child(&self, user_id: &str, name: &str) -> Result<Child> {
        let s = self.clone();
        let user_id = user_id.to_owned();
        let name = name.to_owned();
        blocking(move || s.add_child(&user_id, &name)).await
    }

    async fn list_memories(&self, child_id: i64) -> Result<Vec<Memory>> {
        let s = self.clone();
        blocking(move || s.list_memories(child_id)).await
    }

    async fn add_memory(&self, memory: &NewMemory) -> Result<Memory> {
        let s = self.clone();
        let memory = memory.clone();
        blocking(move || s.add_memory(&memory)).await
    }
}
