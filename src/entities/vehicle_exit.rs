//! Vehicle exit entity - One row per completed exit event.
//!
//! This is a projection of the exit event that exists independently of the
//! in-place update on the vehicle row; deployments choose which of the two
//! representations to write. `print_count` starts at 0 and is only ever
//! incremented by exactly 1 per print acknowledgement.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Vehicle exit database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicle_exits")]
pub struct Model {
    /// Unique identifier for the exit record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Ticket number presented at the exit gate
    pub ticket_number: String,
    /// Plate number of the exiting vehicle
    pub vehicle_number: String,
    /// When the vehicle left the facility
    pub exit_time: DateTimeUtc,
    /// How many times a receipt was physically printed for this exit
    pub print_count: i32,
}

/// `VehicleExit` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
