//! Business logic for storybook generation.
//!
//! One service, one pipeline: reserve quota, aggregate memories into a
//! prompt, generate content, render a theme, optionally delegate PDF
//! rendering.

mod error;
mod generation;

pub use error::GenerationError;
pub use generation::GenerationService;
