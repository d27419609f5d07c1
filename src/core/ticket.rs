//! Ticket numbering - the two coexisting schemes and the sequence seam.
//!
//! Automated gate entries stamp the entry timestamp into the ticket number
//! (`TKT<YYYYMMDDHHMMSS>`); push-button kiosk entries draw from a zero-padded
//! sequential counter (`OFF<NNNN>`). Counter derivation sits behind
//! [`SequenceProvider`] so the default count-based implementation (a
//! read-then-insert with a known race under concurrent registration) can be
//! swapped for a database-level atomic sequence without touching registration.

use crate::entities::{ParkingTicket, parking_ticket};
use crate::errors::Result;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, PaginatorTrait, prelude::*};
use std::sync::atomic::{AtomicU32, Ordering};

/// Prefix for sequentially numbered offline/push-button tickets.
pub const OFFLINE_TICKET_PREFIX: &str = "OFF";

/// Prefix for timestamp-stamped gate tickets.
pub const TIMESTAMP_TICKET_PREFIX: &str = "TKT";

/// Which numbering scheme an entry flow uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TicketScheme {
    /// `TKT<YYYYMMDDHHMMSS>` from the entry timestamp. Sub-second concurrent
    /// entries can collide; a detected collision is reported as
    /// `Error::DuplicateTicket` rather than silently overwritten.
    Timestamp,
    /// `OFF<NNNN>` from the offline ticket counter.
    Offline,
}

impl TicketScheme {
    /// Tag recorded on the vehicle row to identify the originating flow.
    #[must_use]
    pub const fn client_tag(self) -> &'static str {
        match self {
            Self::Timestamp => "GATE",
            Self::Offline => "PUSH-BUTTON",
        }
    }
}

/// Builds a timestamp-scheme ticket number, second precision.
#[must_use]
pub fn timestamp_ticket_number(now: DateTime<Utc>) -> String {
    format!("{TIMESTAMP_TICKET_PREFIX}{}", now.format("%Y%m%d%H%M%S"))
}

/// Builds an offline-scheme ticket number, zero-padded to 4 digits.
#[must_use]
pub fn offline_ticket_number(sequence: u32) -> String {
    format!("{OFFLINE_TICKET_PREFIX}{sequence:04}")
}

/// Source of the next offline ticket sequence number.
#[allow(async_fn_in_trait)]
pub trait SequenceProvider {
    /// Returns the next sequence value, starting at 1.
    async fn next(&self) -> Result<u32>;
}

/// Store-backed provider: counts existing tickets with the offline prefix and
/// adds one. This is a read-then-insert; two concurrent registrations may
/// derive the same value. Run it inside the registration transaction, or
/// substitute an atomic sequence where the backing store offers one.
pub struct TicketCountSequence<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> TicketCountSequence<'a, C> {
    /// Creates a provider counting through the given connection or transaction.
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }
}

impl<C: ConnectionTrait> SequenceProvider for TicketCountSequence<'_, C> {
    async fn next(&self) -> Result<u32> {
        let count = ParkingTicket::find()
            .filter(parking_ticket::Column::TicketNumber.starts_with(OFFLINE_TICKET_PREFIX))
            .count(self.conn)
            .await?;

        Ok(u32::try_from(count).unwrap_or(u32::MAX).saturating_add(1))
    }
}

/// Race-free in-process provider used in tests and available as a drop-in
/// replacement where a shared store-side counter is not required.
#[derive(Debug, Default)]
pub struct MemorySequence(AtomicU32);

impl MemorySequence {
    /// Creates a provider whose first value will be `start`.
    #[must_use]
    pub fn starting_at(start: u32) -> Self {
        Self(AtomicU32::new(start.saturating_sub(1)))
    }
}

impl SequenceProvider for MemorySequence {
    async fn next(&self) -> Result<u32> {
        Ok(self.0.fetch_add(1, Ordering::SeqCst) + 1)
    }
}
