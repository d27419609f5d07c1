//! Engine settings loading from parkgate.toml
//!
//! Defaults applied during input normalization (office tag, vehicle type) and
//! the recent-activity listing limits live here rather than being scattered as
//! literals through the engine. All fields have defaults, so a missing or
//! partial file still yields a usable configuration.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Engine-wide defaults and limits.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
    /// Office tag applied when no `officeId` alias is supplied
    pub default_office_id: String,
    /// Vehicle category applied when no vehicle-type alias is supplied
    pub default_vehicle_type: String,
    /// Default page size for recent-activity listings
    pub recent_limit: u64,
    /// Hard cap for recent-activity listings; larger requests are clamped
    pub max_recent_limit: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_office_id: "OFF0001".to_string(),
            default_vehicle_type: "Motor".to_string(),
            recent_limit: 10,
            max_recent_limit: 100,
        }
    }
}

/// Loads engine settings from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML syntax is invalid.
/// Missing fields fall back to their defaults.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read settings file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse settings file: {e}"),
    })
}
