//! Fee schedule rate table loading from fees.toml
//!
//! The rate card is deployment policy, so it lives in configuration rather
//! than code. A missing file is not an error for callers that are happy with
//! the flat default; see [`crate::core::fees::RateTable`].

use crate::core::fees::RateTable;
use crate::errors::{Error, Result};
use std::path::Path;

/// Loads the fee schedule rate table from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML syntax is invalid.
pub fn load_rate_table<P: AsRef<Path>>(path: P) -> Result<RateTable> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read fee schedule file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse fee schedule file: {e}"),
    })
}
