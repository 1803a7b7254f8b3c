//! Storage capability trait.
//!
//! Models the external storage/identity collaborator as a narrow
//! key-value-with-query interface, so any engine can back it and tests can
//! substitute an in-memory implementation. The trait is async; the SQLite
//! implementation uses `spawn_blocking` internally.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{Child, Memory, NewMemory, QuotaDecision, UsagePeriod};

/// Storage operations needed by the generation pipeline and the thin CRUD
/// glue around it.
#[async_trait]
pub trait JournalStore: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────────
    // Identity
    // ─────────────────────────────────────────────────────────────────────────────

    /// Resolve a bearer token to a user id, or `None` if unknown.
    async fn lookup_token(&self, token: &str) -> Result<Option<String>>;

    /// Register a bearer token for a user.
    async fn grant_token(&self, user_id: &str, token: &str) -> Result<()>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Usage ledger
    // ─────────────────────────────────────────────────────────────────────────────

    /// Atomically reserve one generation call for `(user_id, period_start)`.
    ///
    /// Increments the call count only while it is below `quota`; a denied
    /// reservation leaves the row untouched and reports the current count.
    async fn reserve_call(
        &self,
        user_id: &str,
        period_start: DateTime<Utc>,
        quota: u32,
    ) -> Result<QuotaDecision>;

    /// Best-effort undo of a reservation whose generation failed before an
    /// artifact existed. Never drops the count below zero.
    async fn release_call(&self, user_id: &str, period_start: DateTime<Utc>) -> Result<()>;

    /// Read a ledger row. `None` means no calls this period.
    async fn get_usage(
        &self,
        user_id: &str,
        period_start: DateTime<Utc>,
    ) -> Result<Option<UsagePeriod>>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Children and memories
    // ─────────────────────────────────────────────────────────────────────────────

    /// Get a child by id.
    async fn get_child(&self, id: i64) -> Result<Option<Child>>;

    /// List a user's children, insertion-ordered.
    async fn list_children(&self, user_id: &str) -> Result<Vec<Child>>;

    /// Create a child for a user.
    async fn add_child(&self, user_id: &str, name: &str) -> Result<Child>;

    /// List a child's memories ordered by `taken_at` ascending; rows without
    /// a timestamp sort last, tie-broken by insertion order.
    async fn list_memories(&self, child_id: i64) -> Result<Vec<Memory>>;

    /// Record a memory.
    async fn add_memory(&self, memory: &NewMemory) -> Result<Memory>;
}
