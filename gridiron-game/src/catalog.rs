//! Fixed play catalog and uniform play selection.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::rng::Dice;

/// Category tag used for specialty bonus matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayCategory {
    Running,
    Passing,
    Neutral,
}

impl PlayCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Passing => "passing",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for PlayCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identifier of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayId {
    RunMiddle,
    RunWide,
    ShortPass,
    LongPass,
}

impl PlayId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RunMiddle => "run_middle",
            Self::RunWide => "run_wide",
            Self::ShortPass => "short_pass",
            Self::LongPass => "long_pass",
        }
    }

    /// Catalog entry for this id.
    #[must_use]
    pub fn play(self) -> &'static Play {
        match self {
            Self::RunMiddle => &CATALOG[0],
            Self::RunWide => &CATALOG[1],
            Self::ShortPass => &CATALOG[2],
            Self::LongPass => &CATALOG[3],
        }
    }
}

impl fmt::Display for PlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "run_middle" => Ok(Self::RunMiddle),
            "run_wide" => Ok(Self::RunWide),
            "short_pass" => Ok(Self::ShortPass),
            "long_pass" => Ok(Self::LongPass),
            _ => Err(()),
        }
    }
}

/// One offensive action with nominal yardage and a symmetric variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Play {
    pub id: PlayId,
    pub name: &'static str,
    pub base_yards: i32,
    pub variance: i32,
    pub category: PlayCategory,
}

impl Play {
    /// Nominal gain before bonus, variance, and fumbles.
    #[must_use]
    pub const fn expected_yards(&self) -> i32 {
        self.base_yards
    }
}

impl fmt::Display for Play {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

pub static CATALOG: [Play; 4] = [
    Play {
        id: PlayId::RunMiddle,
        name: "Run middle",
        base_yards: 6,
        variance: 2,
        category: PlayCategory::Running,
    },
    Play {
        id: PlayId::RunWide,
        name: "Run wide",
        base_yards: 10,
        variance: 3,
        category: PlayCategory::Running,
    },
    Play {
        id: PlayId::ShortPass,
        name: "Short pass",
        base_yards: 14,
        variance: 2,
        category: PlayCategory::Passing,
    },
    Play {
        id: PlayId::LongPass,
        name: "Long pass",
        base_yards: 20,
        variance: 5,
        category: PlayCategory::Passing,
    },
];

/// Two distinct plays offered for one turn, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayOffer {
    pub first: &'static Play,
    pub second: &'static Play,
}

impl PlayOffer {
    #[must_use]
    pub const fn get(&self, slot: Slot) -> &'static Play {
        match slot {
            Slot::First => self.first,
            Slot::Second => self.second,
        }
    }

    #[must_use]
    pub const fn plays(&self) -> [&'static Play; 2] {
        [self.first, self.second]
    }
}

/// Position of a play inside an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    /// One-based label shown to the user.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::First => "1",
            Self::Second => "2",
        }
    }
}

pub fn catalog() -> impl Iterator<Item = &'static Play> {
    CATALOG.iter()
}

#[must_use]
pub fn find_by_name(name: &str) -> Option<&'static Play> {
    CATALOG.iter().find(|play| play.name == name)
}

/// Uniform pick over the whole catalog.
pub fn random_play(dice: &mut impl Dice) -> &'static Play {
    &CATALOG[dice.pick(CATALOG.len())]
}

/// Pick two plays with distinct names.
///
/// The second pick is uniform over the entries left after the first, which
/// matches resampling until distinct but never needs more than two draws.
pub fn two_distinct_plays(dice: &mut impl Dice) -> PlayOffer {
    let first_idx = dice.pick(CATALOG.len());
    let mut second_idx = dice.pick(CATALOG.len() - 1);
    if second_idx >= first_idx {
        second_idx += 1;
    }
    PlayOffer {
        first: &CATALOG[first_idx],
        second: &CATALOG[second_idx],
    }
}
