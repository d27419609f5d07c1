//! Fee schedule policy - maps parked duration and vehicle category to a fee.
//!
//! The schedule is a policy collaborator, not hardwired logic: exit processing
//! accepts any [`FeeSchedule`] implementation. The shipped implementation is a
//! bracket-based [`RateTable`] that can be loaded from configuration; its
//! default is a flat amount for any duration and category, which matches the
//! trivial schedule the facility ran with before a rate card was decided.

use chrono::Duration;
use serde::Deserialize;

/// Policy interface: compute the fee for a completed parking stay.
pub trait FeeSchedule {
    /// Returns the fee for a vehicle of `vehicle_type` parked for `parked`.
    fn amount(&self, parked: Duration, vehicle_type: &str) -> f64;
}

/// One row of the rate card.
#[derive(Debug, Clone, Deserialize)]
pub struct RateBracket {
    /// Vehicle category this bracket applies to; `None` means any category
    #[serde(default)]
    pub vehicle_type: Option<String>,
    /// Upper bound of the bracket in minutes; `None` means open-ended
    #[serde(default)]
    pub up_to_minutes: Option<i64>,
    /// Fee charged when this bracket applies
    pub amount: f64,
}

/// Bracket-based fee schedule keyed by elapsed-time ranges per vehicle category.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateTable {
    /// Rate card rows; the tightest applicable bracket wins
    pub brackets: Vec<RateBracket>,
    /// Fallback fee when no bracket matches
    pub flat_amount: f64,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            brackets: Vec::new(),
            flat_amount: 5000.0,
        }
    }
}

impl RateTable {
    /// Rounds a duration up to whole minutes for bracket matching.
    fn billed_minutes(parked: Duration) -> i64 {
        let seconds = parked.num_seconds().max(0);
        (seconds + 59) / 60
    }
}

impl FeeSchedule for RateTable {
    fn amount(&self, parked: Duration, vehicle_type: &str) -> f64 {
        let minutes = Self::billed_minutes(parked);

        self.brackets
            .iter()
            .filter(|bracket| {
                bracket
                    .vehicle_type
                    .as_ref()
                    .is_none_or(|t| t.eq_ignore_ascii_case(vehicle_type))
            })
            .filter(|bracket| bracket.up_to_minutes.is_none_or(|cap| minutes <= cap))
            .min_by_key(|bracket| bracket.up_to_minutes.unwrap_or(i64::MAX))
            .map_or(self.flat_amount, |bracket| bracket.amount)
    }
}
