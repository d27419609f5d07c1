//! Shared test utilities for `Parkgate`.
//!
//! This module provides common helper functions for setting up test databases
//! and registering test vehicles with sensible defaults, plus a fixed clock
//! reading so every timestamp-derived value is deterministic.

use crate::{
    config::Settings,
    core::entry::{self, EntryInput, EntryReceipt},
    core::ticket::TicketScheme,
    errors::Result,
};
use chrono::{DateTime, TimeZone, Utc};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Initializes tracing for tests; safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Default settings used throughout the tests.
#[must_use]
pub fn test_settings() -> Settings {
    Settings::default()
}

/// The fixed clock reading used by deterministic tests: 2025-01-01 12:00:00 UTC.
///
/// At this instant the timestamp ticket scheme yields `TKT20250101120000` and
/// the synthesized plate fallback yields `UNKNOWN_250101120000`.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn fixed_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
}

/// Registers a test vehicle with the given plate under the timestamp scheme
/// at the fixed clock reading.
pub async fn enter_test_vehicle(db: &DatabaseConnection, plate: &str) -> Result<EntryReceipt> {
    entry::register_entry(
        db,
        EntryInput {
            plate_number: Some(plate.to_string()),
            ..Default::default()
        },
        TicketScheme::Timestamp,
        fixed_clock(),
        &test_settings(),
    )
    .await
}

/// Registers a test vehicle with full control over input, scheme, and clock.
pub async fn enter_vehicle_at(
    db: &DatabaseConnection,
    input: EntryInput,
    scheme: TicketScheme,
    now: DateTime<Utc>,
) -> Result<EntryReceipt> {
    entry::register_entry(db, input, scheme, now, &test_settings()).await
}
