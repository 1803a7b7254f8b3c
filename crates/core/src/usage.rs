//! Usage ledger types and billing-period math.
//!
//! Billing periods are calendar months in UTC, identified by their first
//! instant. The ledger is keyed by `(user_id, period_start)` so periods
//! align to calendar months regardless of when the user signed up.

use chrono::{DateTime, Datelike, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the usage ledger: how many generation calls a user has made
/// in a billing period. Rows are never deleted — history is retained for
/// billing and audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsagePeriod {
    pub user_id: String,
    pub period_start: DateTime<Utc>,
    pub calls: u32,
}

/// Outcome of an atomic quota reservation.
///
/// `calls` is the ledger count *after* the reservation when `allowed`,
/// and the unchanged count when denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaDecision {
    pub allowed: bool,
    pub calls: u32,
}

/// A calendar-month billing period, identified by its first instant in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BillingPeriod(DateTime<Utc>);

impl BillingPeriod {
    /// The billing period containing `instant`.
    #[must_use]
    pub fn containing(instant: DateTime<Utc>) -> Self {
        let date = instant.date_naive();
        // Day 1 of an existing month is always representable.
        let first = date.with_day(1).unwrap_or(date);
        Self(first.and_time(NaiveTime::MIN).and_utc())
    }

    /// The current billing period.
    #[must_use]
    pub fn current() -> Self {
        Self::containing(Utc::now())
    }

    /// First instant of the period.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}
