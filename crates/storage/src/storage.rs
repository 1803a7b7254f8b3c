//! SQLite storage implementation

use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use storynest_core::{Child, Memory, NewMemory, QuotaDecision, UsagePeriod};

use crate::migrations;

#[derive(Clone)]
pub struct Storage {
    conn: Arc<Mutex<Connection>>,
}

fn lock_conn<T>(mutex: &Mutex<T>) -> Result<std::sync::MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|e: PoisonError<_>| anyhow::anyhow!("Database lock poisoned: {}", e))
}

fn parse_ts(s: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn read_memory(row: &rusqlite::Row<'_>) -> Result<Memory, rusqlite::Error> {
    let taken_at_str: Option<String> = row.get(4)?;
    let taken_at = taken_at_str.as_deref().map(parse_ts).transpose()?;
    let created_at_str: String = row.get(5)?;
    Ok(Memory {
        id: row.get(0)?,
        child_id: row.get(1)?,
        note: row.get(2)?,
        image_path: row.get(3)?,
        taken_at,
        created_at: parse_ts(&created_at_str)?,
    })
}

impl Storage {
    pub fn new(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        let storage = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        let conn = lock_conn(&storage.conn)?;
        migrations::run_migrations(&conn)?;
        drop(conn);

        Ok(storage)
    }

    // ── Identity ─────────────────────────────────────────────────

    pub fn lookup_token(&self, token: &str) -> Result<Option<String>> {
        let conn = lock_conn(&self.conn)?;
        let user_id = conn
            .query_row(
                "SELECT user_id FROM api_tokens WHERE token = ?1",
                params![token],
                |row| row.get(0),
            )
            .optional()?;
        Ok(user_id)
    }

    pub fn grant_token(&self, user_id: &str, token: &str) -> Result<()> {
        let conn = lock_conn(&self.conn)?;
        conn.execute(
            "INSERT OR REPLACE INTO api_tokens (token, user_id, created_at) VALUES (?1, ?2, ?3)",
            params![token, user_id, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    // ── Usage ledger ─────────────────────────────────────────────

    /// Atomic check-and-increment: one upsert that only bumps the count
    /// while it is below `quota`. `changes()` tells reserved from denied.
    pub fn reserve_call(
        &self,
        user_id: &str,
        period_start: DateTime<Utc>,
        quota: u32,
    ) -> Result<QuotaDecision> {
        if quota == 0 {
            let calls = self
                .get_usage(user_id, period_start)?
                .map_or(0, |u| u.calls);
            return Ok(QuotaDecision { allowed: false, calls });
        }

        let conn = lock_conn(&self.conn)?;
        let period = period_start.to_rfc3339();
        let changed = conn.execute(
            r#"INSERT INTO usage (user_id, period_start, calls) VALUES (?1, ?2, 1)
               ON CONFLICT(user_id, period_start) DO UPDATE SET calls = calls + 1
               WHERE usage.calls < ?3"#,
            params![user_id, period, quota],
        )?;
        let calls: u32 = conn
            .query_row(
                "SELECT calls FROM usage WHERE user_id = ?1 AND period_start = ?2",
                params![user_id, period],
                |row| row.get(0),
            )
            .optional()?
            .unwrap_or(0);
        Ok(QuotaDecision {
            allowed: changed > 0,
            calls,
        })
    }

    pub fn release_call(&self, user_id: &str, period_start: DateTime<Utc>) -> Result<()> {
        let conn = lock_conn(&self.conn)?;
        conn.execute(
            r#"UPDATE usage SET calls = calls - 1
               WHERE user_id = ?1 AND period_start = ?2 AND calls > 0"#,
            params![user_id, period_start.to_rfc3339()],
        )?;
        Ok(())
    }

    pub fn get_usage(
        &self,
        user_id: &str,
        period_start: DateTime<Utc>,
    ) -> Result<Option<UsagePeriod>> {
        let conn = lock_conn(&self.conn)?;
        let row = conn
            .query_row(
                "SELECT calls FROM usage WHERE user_id = ?1 AND period_start = ?2",
                params![user_id, period_start.to_rfc3339()],
                |row| row.get::<_, u32>(0),
            )
            .optional()?;
        Ok(row.map(|calls| UsagePeriod {
            user_id: user_id.to_owned(),
            period_start,
            calls,
        }))
    }

    // ── Children ─────────────────────────────────────────────────

    pub fn get_child(&self, id: i64) -> Result<Option<Child>> {
        let conn = lock_conn(&self.conn)?;
        let child = conn
            .query_row(
                "SELECT id, user_id, name FROM children WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Child {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        name: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(child)
    }

    pub fn list_children(&self, user_id: &str) -> Result<Vec<Child>> {
        let conn = lock_conn(&self.conn)?;
        let mut stmt =
            conn.prepare("SELECT id, user_id, name FROM children WHERE user_id = ?1 ORDER BY id")?;
        let rows = stmt.query_map(params![user_id], |row| {
            Ok(Child {
                id: row.get(0)?,
                user_id: row.get(1)?,
                name: row.get(2)?,
            })
        })?;
        let mut children = Vec::new();
        for child in rows {
            children.push(child?);
        }
        Ok(children)
    }

    pub fn add_child(&self, user_id: &str, name: &str) -> Result<Child> {
        let conn = lock_conn(&self.conn)?;
        conn.execute(
            "INSERT INTO children (user_id, name) VALUES (?1, ?2)",
            params![user_id, name],
        )?;
        Ok(Child {
            id: conn.last_insert_rowid(),
            user_id: user_id.to_owned(),
            name: name.to_owned(),
        })
    }

    // ── Memories ─────────────────────────────────────────────────

    /// Chronological listing. Rows without `taken_at` sort last,
    /// tie-broken by insertion order.
    pub fn list_memories(&self, child_id: i64) -> Result<Vec<Memory>> {
        let conn = lock_conn(&self.conn)?;
        let mut stmt = conn.prepare(
            r#"SELECT id, child_id, note, image_path, taken_at, created_at
               FROM memories WHERE child_id = ?1
               ORDER BY taken_at IS NULL, taken_at ASC, id ASC"#,
        )?;
        let rows = stmt.query_map(params![child_id], read_memory)?;
        let mut memories = Vec::new();
        for memory in rows {
            memories.push(memory?);
        }
        Ok(memories)
    }

    pub fn add_memory(&self, memory: &NewMemory) -> Result<Memory> {
        let conn = lock_conn(&self.conn)?;
        let created_at = Utc::now();
        conn.execute(
            r#"INSERT INTO memories (child_id, note, image_path, taken_at, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5)"#,
            params![
                memory.child_id,
                memory.note,
                memory.image_path,
                memory.taken_at.map(|d| d.to_rfc3339()),
                created_at.to_rfc3339(),
            ],
        )?;
        Ok(Memory {
            id: conn.last_insert_rowid(),
            child_id: memory.child_id,
            note: memory.note.clone(),
            image_path: memory.image_path.clone(),
            taken_at: memory.taken_at,
            created_at,
        })
    }
}
