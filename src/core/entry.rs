//! Entry registration - input normalization and atomic vehicle/ticket creation.
//!
//! Client payloads arrive from three flavors of hardware (automated gates,
//! push-button kiosks, exit-gate terminals) that disagree on field names and
//! omit fields freely. Each canonical field has an explicit ordered alias
//! list, resolved exactly once at this boundary into a typed [`EntryInput`];
//! nothing deeper in the engine ever looks at raw payload keys.

use crate::config::Settings;
use crate::core::ticket::{self, SequenceProvider, TicketCountSequence, TicketScheme};
use crate::entities::{ParkingTicket, parking_ticket, vehicle};
use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, Set, TransactionTrait, prelude::*};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

/// Accepted payload keys for the plate number, in resolution order.
pub const PLATE_ALIASES: [&str; 3] = ["plateNumber", "plat", "nomor_plat"];
/// Accepted payload keys for the vehicle type, in resolution order.
pub const VEHICLE_TYPE_ALIASES: [&str; 2] = ["vehicleType", "jenis"];
/// Accepted payload keys for the numeric vehicle-type classifier.
pub const VEHICLE_TYPE_ID_ALIASES: [&str; 1] = ["vehicleTypeId"];
/// Accepted payload keys for the originating office tag.
pub const OFFICE_ALIASES: [&str; 1] = ["officeId"];
/// Accepted payload keys for the parked-flag override.
pub const PARKED_ALIASES: [&str; 1] = ["isParked"];

/// Typed entry request after alias resolution; every field may still be absent.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EntryInput {
    /// Plate number, if any alias carried a non-empty value
    pub plate_number: Option<String>,
    /// Vehicle category, if supplied
    pub vehicle_type: Option<String>,
    /// Numeric vehicle-type classifier, if supplied
    pub vehicle_type_id: Option<i32>,
    /// Originating office tag, if supplied
    pub office_id: Option<String>,
    /// Parked-flag override, if supplied
    pub is_parked: Option<bool>,
}

impl EntryInput {
    /// Resolves a raw JSON payload into a typed request.
    ///
    /// For each canonical field the first alias carrying a non-empty value
    /// wins; empty strings are treated as absent, matching how the field
    /// hardware pads unused slots.
    #[must_use]
    pub fn from_json(payload: &Value) -> Self {
        Self {
            plate_number: first_nonempty_string(payload, &PLATE_ALIASES),
            vehicle_type: first_nonempty_string(payload, &VEHICLE_TYPE_ALIASES),
            vehicle_type_id: first_integer(payload, &VEHICLE_TYPE_ID_ALIASES),
            office_id: first_nonempty_string(payload, &OFFICE_ALIASES),
            is_parked: first_bool(payload, &PARKED_ALIASES),
        }
    }
}

fn first_nonempty_string(payload: &Value, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .filter_map(|key| payload.get(key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(ToString::to_string)
}

fn first_integer(payload: &Value, aliases: &[&str]) -> Option<i32> {
    aliases
        .iter()
        .filter_map(|key| payload.get(key))
        .filter_map(Value::as_i64)
        .find_map(|n| i32::try_from(n).ok())
}

fn first_bool(payload: &Value, aliases: &[&str]) -> Option<bool> {
    aliases
        .iter()
        .filter_map(|key| payload.get(key))
        .find_map(Value::as_bool)
}

/// Synthesizes the fallback plate for entries arriving without one.
///
/// Format: `UNKNOWN_<yymmddHHMMSS>`, second precision, so the plate is never
/// empty and stays traceable to the entry moment.
#[must_use]
pub fn fallback_plate(now: DateTime<Utc>) -> String {
    format!("UNKNOWN_{}", now.format("%y%m%d%H%M%S"))
}

/// Default numeric classifier when none is supplied: "motor" (any casing)
/// maps to 2, every other category to 1.
#[must_use]
pub fn default_vehicle_type_id(vehicle_type: &str) -> i32 {
    if vehicle_type.eq_ignore_ascii_case("motor") {
        2
    } else {
        1
    }
}

/// Fully resolved entry request with every default applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEntry {
    /// Plate number, never empty
    pub plate_number: String,
    /// Vehicle category
    pub vehicle_type: String,
    /// Numeric vehicle-type classifier
    pub vehicle_type_id: i32,
    /// Originating office tag
    pub office_id: String,
    /// Whether the vehicle counts as parked on creation
    pub is_parked: bool,
}

/// Applies defaults to a typed entry request.
#[must_use]
pub fn normalize(input: EntryInput, now: DateTime<Utc>, settings: &Settings) -> NormalizedEntry {
    let plate_number = input
        .plate_number
        .filter(|p| !p.trim().is_empty())
        .map_or_else(|| fallback_plate(now), |p| p.trim().to_string());

    let vehicle_type = input
        .vehicle_type
        .filter(|t| !t.trim().is_empty())
        .map_or_else(
            || settings.default_vehicle_type.clone(),
            |t| t.trim().to_string(),
        );

    let vehicle_type_id = input
        .vehicle_type_id
        .unwrap_or_else(|| default_vehicle_type_id(&vehicle_type));

    let office_id = input
        .office_id
        .filter(|o| !o.trim().is_empty())
        .map_or_else(
            || settings.default_office_id.clone(),
            |o| o.trim().to_string(),
        );

    NormalizedEntry {
        plate_number,
        vehicle_type,
        vehicle_type_id,
        office_id,
        is_parked: input.is_parked.unwrap_or(true),
    }
}

/// What the entry flow hands back to the client for printing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryReceipt {
    /// Identifier of the created vehicle record
    pub vehicle_id: i64,
    /// Issued ticket number
    pub ticket_number: String,
    /// Normalized plate number
    pub plate_number: String,
    /// Normalized vehicle category
    pub vehicle_type: String,
    /// Entry timestamp, fixed `YYYY-MM-DD HH:MM:SS` format
    pub entry_time: String,
}

/// Registers a vehicle entry: normalizes the input, issues a ticket under the
/// selected scheme, and creates the vehicle and ticket records in one
/// transaction. Either both records exist afterwards or neither does; a
/// ticket-number collision rolls everything back and reports
/// [`Error::DuplicateTicket`].
pub async fn register_entry(
    db: &DatabaseConnection,
    input: EntryInput,
    scheme: TicketScheme,
    now: DateTime<Utc>,
    settings: &Settings,
) -> Result<EntryReceipt> {
    let normalized = normalize(input, now, settings);

    let txn = db.begin().await?;

    let ticket_number = match scheme {
        TicketScheme::Timestamp => ticket::timestamp_ticket_number(now),
        TicketScheme::Offline => {
            let sequence = TicketCountSequence::new(&txn).next().await?;
            ticket::offline_ticket_number(sequence)
        }
    };

    let collision = ParkingTicket::find()
        .filter(parking_ticket::Column::TicketNumber.eq(&ticket_number))
        .one(&txn)
        .await?;
    if collision.is_some() {
        warn!(ticket = %ticket_number, "ticket number collision on entry registration");
        return Err(Error::DuplicateTicket {
            ticket: ticket_number,
        });
    }

    let vehicle = vehicle::ActiveModel {
        plate_number: Set(normalized.plate_number.clone()),
        vehicle_type: Set(normalized.vehicle_type.clone()),
        vehicle_type_id: Set(normalized.vehicle_type_id),
        ticket_number: Set(ticket_number.clone()),
        office_id: Set(normalized.office_id),
        entry_time: Set(now),
        exit_time: Set(None),
        is_parked: Set(normalized.is_parked),
        is_active: Set(true),
        created_by: Set(scheme.client_tag().to_string()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    parking_ticket::ActiveModel {
        ticket_number: Set(ticket_number.clone()),
        vehicle_id: Set(vehicle.id),
        barcode_data: Set(normalized.plate_number.clone()),
        issue_time: Set(now),
        entry_time: Set(now),
        is_used: Set(false),
        amount: Set(0.0),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!(
        vehicle_id = vehicle.id,
        ticket = %ticket_number,
        plate = %normalized.plate_number,
        "vehicle entry registered"
    );

    Ok(EntryReceipt {
        vehicle_id: vehicle.id,
        ticket_number,
        plate_number: normalized.plate_number,
        vehicle_type: normalized.vehicle_type,
        entry_time: crate::core::format_timestamp(now),
    })
}
