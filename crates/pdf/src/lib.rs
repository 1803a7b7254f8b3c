//! Client for the PDF rendering delegate.
//!
//! The delegate is a separate service that owns headless-browser rendering,
//! margins, page size, and persisting the binary to durable storage. This
//! crate only speaks its wire contract: an authenticated POST of
//! `{html, filename}` returning a durable (possibly signed, time-limited)
//! URL.

mod client;
mod error;

pub use client::{pdf_filename, PdfClient};
pub use error::RenderError;
