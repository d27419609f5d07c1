//! Unified error type for the lifecycle engine.
//!
//! Every operation returns [`Result`]; storage-level failures are wrapped as
//! `StorageUnavailable` so callers can distinguish connectivity problems from
//! business-logic outcomes like a missing ticket.

use thiserror::Error;

/// All failure kinds the engine can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file missing, unreadable, or malformed.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    /// A required field is absent after alias resolution, or otherwise unusable.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Which field was missing or malformed
        message: String,
    },

    /// No vehicle/ticket matches the presented ticket number.
    #[error("Ticket not found: {ticket}")]
    TicketNotFound {
        /// The ticket number that was presented
        ticket: String,
    },

    /// No exit record with the given id exists.
    #[error("Exit record not found: {id}")]
    ExitRecordNotFound {
        /// The exit record id that was presented
        id: i64,
    },

    /// A freshly generated ticket number already exists in the store.
    ///
    /// The timestamp scheme can collide on sub-second concurrent entries and
    /// the offline scheme's counter is a read-then-insert; both are known
    /// limitations surfaced as this variant rather than silent overwrites.
    #[error("Duplicate ticket number: {ticket}")]
    DuplicateTicket {
        /// The colliding ticket number
        ticket: String,
    },

    /// The record store failed (connectivity, timeout, transaction error).
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] sea_orm::DbErr),

    /// A partial write was detected where an all-or-nothing update was expected.
    #[error("Storage inconsistent: {message}")]
    StorageInconsistent {
        /// Description of the inconsistency
        message: String,
    },

    /// I/O error (configuration file reads).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
