//! Core types and traits for storynest
//!
//! This crate contains domain types shared across all other crates.

pub mod constants;
pub mod env_config;

mod generation;
mod journal;
mod store;
mod usage;

pub use generation::*;
pub use journal::*;
pub use store::*;
pub use usage::*;
