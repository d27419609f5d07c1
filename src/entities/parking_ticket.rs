//! Parking ticket entity - The token issued at entry and presented at exit.
//!
//! Created atomically with its owning vehicle. `amount` is 0 until exit
//! processing populates it from the fee schedule, at which point `is_used`
//! flips to true. `ticket_number` carries a unique constraint so a numbering
//! collision fails the insert instead of silently duplicating.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Parking ticket database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "parking_tickets")]
pub struct Model {
    /// Unique identifier for the ticket
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Format-stamped ticket number (`TKT...` or `OFF...`)
    #[sea_orm(unique)]
    pub ticket_number: String,
    /// ID of the vehicle this ticket was issued for
    pub vehicle_id: i64,
    /// Data encoded into the printed barcode (the plate number)
    pub barcode_data: String,
    /// When the ticket was issued
    pub issue_time: DateTimeUtc,
    /// Entry timestamp copied from the vehicle record
    pub entry_time: DateTimeUtc,
    /// Set to true when the ticket is consumed by exit processing
    pub is_used: bool,
    /// Fee amount; 0 at issue, populated at exit
    pub amount: f64,
}

/// Defines relationships between ParkingTicket and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each ticket belongs to one vehicle
    #[sea_orm(
        belongs_to = "super::vehicle::Entity",
        from = "Column::VehicleId",
        to = "super::vehicle::Column::Id"
    )]
    Vehicle,
}

impl Related<super::vehicle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicle.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
