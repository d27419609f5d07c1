//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod parking_ticket;
pub mod vehicle;
pub mod vehicle_exit;

// Re-export specific types to avoid conflicts
pub use parking_ticket::{
    Column as ParkingTicketColumn, Entity as ParkingTicket, Model as ParkingTicketModel,
};
pub use vehicle::{Column as VehicleColumn, Entity as Vehicle, Model as VehicleModel};
pub use vehicle_exit::{
    Column as VehicleExitColumn, Entity as VehicleExit, Model as VehicleExitModel,
};
