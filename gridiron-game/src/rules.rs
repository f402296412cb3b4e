//! Tunable drive rules.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    FUMBLE_LOSS_MAX, FUMBLE_LOSS_MIN, FUMBLE_ONE_IN, GOAL_LINE, MAX_PLAYS, OWN_END_LINE,
    SPECIALTY_BONUS_YARDS, START_POSITION, YARDS_FLOOR,
};

/// Errors raised when drive rule invariants are violated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RulesError {
    #[error("start position {value} must be between {min} and {max}")]
    StartOutsideField { value: i32, min: i32, max: i32 },
    #[error("max_plays must be at least 1")]
    NoPlays,
    #[error("fumble_one_in must be at least 1 (got {0})")]
    FumbleOdds(i32),
    #[error("fumble loss range invalid (min {min} > max {max})")]
    FumbleLossRange { min: i32, max: i32 },
    #[error("fumble losses must be positive (got min {0})")]
    FumbleLossSign(i32),
    #[error("yards floor must be negative (got {0})")]
    YardsFloor(i32),
    #[error("specialty bonus must be between 0 and {max} (got {value})")]
    SpecialtyBonus { value: i32, max: i32 },
}

/// Rule set for one drive. Defaults reproduce the classic game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveRules {
    pub start_position: i32,
    pub max_plays: u32,
    pub specialty_bonus: i32,
    pub fumble_one_in: i32,
    pub fumble_loss_min: i32,
    pub fumble_loss_max: i32,
    pub yards_floor: i32,
}

impl Default for DriveRules {
    fn default() -> Self {
        Self {
            start_position: START_POSITION,
            max_plays: MAX_PLAYS,
            specialty_bonus: SPECIALTY_BONUS_YARDS,
            fumble_one_in: FUMBLE_ONE_IN,
            fumble_loss_min: FUMBLE_LOSS_MIN,
            fumble_loss_max: FUMBLE_LOSS_MAX,
            yards_floor: YARDS_FLOOR,
        }
    }
}

impl DriveRules {
    /// Parse a rules override from JSON. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check the rule invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), RulesError> {
        // A drive starting on the goal line would already be over.
        if !(GOAL_LINE + 1..=OWN_END_LINE).contains(&self.start_position) {
            return Err(RulesError::StartOutsideField {
                value: self.start_position,
                min: GOAL_LINE + 1,
                max: OWN_END_LINE,
            });
        }
        if self.max_plays == 0 {
            return Err(RulesError::NoPlays);
        }
        if self.fumble_one_in < 1 {
            return Err(RulesError::FumbleOdds(self.fumble_one_in));
        }
        if self.fumble_loss_min < 1 {
            return Err(RulesError::FumbleLossSign(self.fumble_loss_min));
        }
        if self.fumble_loss_min > self.fumble_loss_max {
            return Err(RulesError::FumbleLossRange {
                min: self.fumble_loss_min,
                max: self.fumble_loss_max,
            });
        }
        if self.yards_floor >= 0 {
            return Err(RulesError::YardsFloor(self.yards_floor));
        }
        if !(0..=OWN_END_LINE).contains(&self.specialty_bonus) {
            return Err(RulesError::SpecialtyBonus {
                value: self.specialty_bonus,
                max: OWN_END_LINE,
            });
        }
        Ok(())
    }
}
