//! Play resolution: specialty bonus, variance, fumbles, and the loss floor.
use serde::{Deserialize, Serialize};

use crate::catalog::Play;
use crate::rng::Dice;
use crate::rules::DriveRules;
use crate::state::Specialty;

/// Breakdown of a single play resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YardageRoll {
    pub base_yards: i32,
    pub bonus: i32,
    pub variance: i32,
    /// Yards lost on a fumble, when one happened.
    pub fumble_loss: Option<i32>,
    /// Final signed yardage after the floor clamp.
    pub yards: i32,
}

impl YardageRoll {
    #[must_use]
    pub const fn fumbled(&self) -> bool {
        self.fumble_loss.is_some()
    }
}

#[must_use]
pub fn specialty_bonus(play: &Play, specialty: Specialty, rules: &DriveRules) -> i32 {
    if play.category == specialty.category() {
        rules.specialty_bonus
    } else {
        0
    }
}

/// Resolve a play into signed yards under the given rules.
///
/// Draw order is fixed: variance, fumble check, then the fumble loss only
/// when the check hits.
pub fn roll_yards(
    play: &Play,
    specialty: Specialty,
    rules: &DriveRules,
    dice: &mut impl Dice,
) -> YardageRoll {
    let bonus = specialty_bonus(play, specialty, rules);
    let base_yards = play.base_yards.saturating_add(bonus);
    let variance = dice.roll(-play.variance, play.variance);
    let mut total = base_yards.saturating_add(variance);

    let fumble_loss = if dice.roll(1, rules.fumble_one_in) == 1 {
        Some(dice.roll(rules.fumble_loss_min, rules.fumble_loss_max))
    } else {
        None
    };
    if let Some(loss) = fumble_loss {
        total = loss.saturating_neg();
    }

    YardageRoll {
        base_yards: play.base_yards,
        bonus,
        variance,
        fumble_loss,
        yards: total.max(rules.yards_floor),
    }
}

/// Signed yards for a play under the classic rules.
pub fn calculate_yards(play: &Play, specialty: Specialty, dice: &mut impl Dice) -> i32 {
    roll_yards(play, specialty, &DriveRules::default(), dice).yards
}
