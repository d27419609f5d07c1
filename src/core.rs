//! Core business logic - framework-agnostic lifecycle operations.
//!
//! Each operation reads current state, computes a transition, and writes the
//! result back within a single call; the engine holds no state of its own.
//! Operations take the current time as an explicit `DateTime<Utc>` argument so
//! the clock stays a caller-owned collaborator and tests are deterministic.

/// Entry registration and input normalization
pub mod entry;
/// Exit processing, duration computation, and print acknowledgement
pub mod exit;
/// Fee schedule policy
pub mod fees;
/// Ticket lookup and recent-activity queries
pub mod lookup;
/// Ticket numbering schemes and the sequence-provider seam
pub mod ticket;

use crate::config::Settings;
use chrono::{DateTime, Utc};

/// Formats a timestamp in the canonical receipt format (`YYYY-MM-DD HH:MM:SS`).
///
/// Entry and exit receipts use this fixed textual form; entity timestamps are
/// serialized as ISO-8601 by their `chrono` serde impls.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Resolves the page size for recent-activity listings: the configured
/// default when unspecified, clamped to the configured maximum.
#[must_use]
pub fn effective_limit(requested: Option<u64>, settings: &Settings) -> u64 {
    requested
        .unwrap_or(settings.recent_limit)
        .min(settings.max_recent_limit)
}
