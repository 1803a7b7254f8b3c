//! Storage layer for storynest
//!
//! SQLite-based storage for the usage ledger, children, memories, and API
//! tokens. Sync `rusqlite` core with an async `JournalStore` implementation
//! via `spawn_blocking`.

mod migrations;
mod storage;
mod store_async;
#[cfg(test)]
mod tests;

pub use storage::Storage;
