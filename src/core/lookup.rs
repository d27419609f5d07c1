//! Ticket lookup and recent-activity projections.
//!
//! Lookup is operator-facing: a mistyped or partially scanned ticket number
//! comes back as a `NotFound` carrying substring-match suggestions instead of
//! a bare failure, so the gate operator can correct it on the spot. An empty
//! suggestion list is a normal outcome, never an error.

use crate::config::Settings;
use crate::entities::vehicle;
use crate::errors::{Error, Result};
use sea_orm::{ConnectionTrait, QueryOrder, QuerySelect, prelude::*};
use serde::Serialize;

/// Full detail returned on an exact ticket match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDetail {
    /// Identifier of the vehicle record
    pub vehicle_id: i64,
    /// The matched ticket number
    pub ticket_number: String,
    /// Plate number of the vehicle
    pub vehicle_number: String,
    /// Vehicle category
    pub vehicle_type: String,
    /// Entry timestamp (ISO-8601 on serialization)
    pub entry_time: DateTimeUtc,
}

/// One partial-match candidate offered after a miss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSuggestion {
    /// Candidate ticket number containing the presented fragment
    pub ticket_number: String,
    /// Plate number of the candidate's vehicle
    pub vehicle_number: String,
}

/// Outcome of a ticket lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "camelCase")]
pub enum TicketLookup {
    /// Exact match
    Found(TicketDetail),
    /// No exact match; `suggestions` lists every ticket containing the fragment
    NotFound {
        /// Partial-match candidates, possibly empty
        suggestions: Vec<TicketSuggestion>,
    },
}

/// Finds the vehicle registered under an exact ticket number.
pub async fn find_vehicle_by_ticket<C: ConnectionTrait>(
    db: &C,
    ticket_number: &str,
) -> Result<Option<vehicle::Model>> {
    vehicle::Entity::find()
        .filter(vehicle::Column::TicketNumber.eq(ticket_number))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Looks up a ticket number, falling back to substring suggestions on a miss.
pub async fn lookup_ticket(db: &DatabaseConnection, ticket_number: &str) -> Result<TicketLookup> {
    let fragment = ticket_number.trim();
    if fragment.is_empty() {
        return Err(Error::InvalidInput {
            message: "ticket number is required".to_string(),
        });
    }

    if let Some(vehicle) = find_vehicle_by_ticket(db, fragment).await? {
        return Ok(TicketLookup::Found(TicketDetail {
            vehicle_id: vehicle.id,
            ticket_number: vehicle.ticket_number,
            vehicle_number: vehicle.plate_number,
            vehicle_type: vehicle.vehicle_type,
            entry_time: vehicle.entry_time,
        }));
    }

    let suggestions = vehicle::Entity::find()
        .filter(vehicle::Column::TicketNumber.contains(fragment))
        .order_by_desc(vehicle::Column::EntryTime)
        .all(db)
        .await?
        .into_iter()
        .map(|v| TicketSuggestion {
            ticket_number: v.ticket_number,
            vehicle_number: v.plate_number,
        })
        .collect();

    Ok(TicketLookup::NotFound { suggestions })
}

/// Lists the most recent vehicle entries, newest first.
///
/// `limit` defaults to the configured page size and is clamped to the
/// configured maximum.
pub async fn list_recent_vehicles(
    db: &DatabaseConnection,
    limit: Option<u64>,
    settings: &Settings,
) -> Result<Vec<vehicle::Model>> {
    vehicle::Entity::find()
        .order_by_desc(vehicle::Column::EntryTime)
        .limit(crate::core::effective_limit(limit, settings))
        .all(db)
        .await
        .map_err(Into::into)
}
