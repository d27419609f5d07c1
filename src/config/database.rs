//! Database configuration module for `Parkgate`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary
//! tables based on the entity definitions. Connections are opened with explicit connect
//! and acquire timeouts so a dead store surfaces as a storage error instead of hanging
//! the calling request.

use crate::entities::{ParkingTicket, Vehicle, VehicleExit};
use crate::errors::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use std::time::Duration;

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function loads `.env` if present, looks for `DATABASE_URL` in the
/// environment, and falls back to a default local `SQLite` file if not found.
pub fn get_database_url() -> String {
    dotenvy::dotenv().ok();
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/parkgate.sqlite".to_string())
}

/// Establishes a connection to the database using the `DATABASE_URL` environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
/// Connect and acquire timeouts are bounded so storage outages propagate as
/// `Error::StorageUnavailable` rather than blocking callers indefinitely.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(get_database_url());
    options
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300));

    Database::connect(options).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from entity definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically generate proper SQL
/// statements for table creation, ensuring the database schema matches the Rust struct
/// definitions. It creates tables for vehicles, parking tickets, and vehicle exits.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let vehicle_table = schema.create_table_from_entity(Vehicle);
    let parking_ticket_table = schema.create_table_from_entity(ParkingTicket);
    let vehicle_exit_table = schema.create_table_from_entity(VehicleExit);

    db.execute(builder.build(&vehicle_table)).await?;
    db.execute(builder.build(&parking_ticket_table)).await?;
    db.execute(builder.build(&vehicle_exit_table)).await?;

    Ok(())
}
