//! Journal entities: children and their recorded memories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A child whose memories are being journaled. Created by the UI on first
/// use; read-only from the generation pipeline's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    pub id: i64,
    pub user_id: String,
    pub name: String,
}

/// A single recorded memory: an optional note, an optional image reference,
/// and an optional timestamp of when the moment happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    pub id: i64,
    pub child_id: i64,
    pub note: Option<String>,
    pub image_path: Option<String>,
    pub taken_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a memory. The storage layer assigns `id` and
/// `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMemory {
    pub child_id: i64,
    pub note: Option<String>,
    pub image_path: Option<String>,
    pub taken_at: Option<DateTime<Utc>>,
}
