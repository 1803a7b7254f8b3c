//! Shared constants for storynest.
//!
//! Centralizes values that would otherwise be duplicated across crates.

/// Free generations per user per calendar month when not overridden.
pub const DEFAULT_MONTHLY_QUOTA: u32 = 5;

/// Interval label used when the caller does not specify one.
pub const DEFAULT_INTERVAL: &str = "monthly";

/// Theme used when the caller does not specify one or names an unknown theme.
pub const DEFAULT_THEME: &str = "classic";

/// Display name used when the referenced child row does not exist.
pub const FALLBACK_CHILD_NAME: &str = "Your child";

/// Placeholder printed in prompt lines for memories without a timestamp.
pub const UNKNOWN_TIMESTAMP: &str = "unknown";

/// Request timeout for outbound LLM and PDF-delegate calls, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;
