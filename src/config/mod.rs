/// Database configuration and connection management
pub mod database;

/// Fee schedule rate table loading from fees.toml
pub mod fees;

/// Engine defaults (office tag, vehicle type, listing limits) from parkgate.toml
pub mod settings;

pub use settings::Settings;
