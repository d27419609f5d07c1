//! Vehicle entity - Represents one physical entry event at the facility.
//!
//! Each vehicle row carries the normalized plate number, the issued
//! `ticket_number` (the lookup key presented at exit), the originating office,
//! and the lifecycle timestamps. `exit_time` stays `None` until exit
//! processing; once set it is always >= `entry_time`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Vehicle database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    /// Unique identifier for the entry event
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Normalized plate number; never empty (synthesized fallback when unsupplied)
    pub plate_number: String,
    /// Vehicle category (e.g., `"Motor"`, `"Car"`)
    pub vehicle_type: String,
    /// Numeric classifier for the vehicle category
    pub vehicle_type_id: i32,
    /// Ticket number issued at entry; 1:1 with the paired parking ticket
    pub ticket_number: String,
    /// Tag of the originating office/location
    pub office_id: String,
    /// When the vehicle entered the facility
    pub entry_time: DateTimeUtc,
    /// When the vehicle left; `None` while still parked
    pub exit_time: Option<DateTimeUtc>,
    /// Whether the vehicle is currently inside the facility
    pub is_parked: bool,
    /// Active/status flag for the record
    pub is_active: bool,
    /// Which client flow registered the entry (`"GATE"` or `"PUSH-BUTTON"`)
    pub created_by: String,
}

/// Defines relationships between Vehicle and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each vehicle owns the ticket issued for it at entry
    #[sea_orm(has_many = "super::parking_ticket::Entity")]
    ParkingTickets,
}

impl Related<super::parking_ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParkingTickets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
