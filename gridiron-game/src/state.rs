use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use crate::catalog::{Play, PlayCategory, PlayId};
use crate::constants::{GOAL_LINE, OWN_END_LINE, STATS_HISTORY_TAIL};
use crate::error::SetupError;
use crate::rules::DriveRules;

/// Player attribute granting a bonus on matching plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Specialty {
    Running,
    Passing,
}

impl Specialty {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Passing => "passing",
        }
    }

    /// Play category this specialty earns a bonus on.
    #[must_use]
    pub const fn category(self) -> PlayCategory {
        match self {
            Self::Running => PlayCategory::Running,
            Self::Passing => PlayCategory::Passing,
        }
    }

    /// Normalize free-form user input (trim, case-fold) into a specialty.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::MissingSpecialty`] for empty input and
    /// [`SetupError::UnknownSpecialty`] when the normalized text is neither
    /// `running` nor `passing`.
    pub fn from_input(raw: &str) -> Result<Self, SetupError> {
        if raw.is_empty() {
            return Err(SetupError::MissingSpecialty);
        }
        let normalized = raw.trim().to_lowercase();
        normalized
            .parse()
            .map_err(|()| SetupError::UnknownSpecialty(normalized))
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Specialty {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(Self::Running),
            "passing" => Ok(Self::Passing),
            _ => Err(()),
        }
    }
}

/// Mutable per-drive player state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub specialty: Specialty,
    /// Yard line, 100 = own end, 0 = goal line.
    pub position: i32,
    pub plays_used: u32,
    pub max_plays: u32,
    pub history: SmallVec<[PlayId; 8]>,
    #[serde(default)]
    pub logs: Vec<String>,
}

impl PlayerState {
    #[must_use]
    pub fn new(name: impl Into<String>, specialty: Specialty) -> Self {
        Self::with_rules(name, specialty, &DriveRules::default())
    }

    #[must_use]
    pub fn with_rules(name: impl Into<String>, specialty: Specialty, rules: &DriveRules) -> Self {
        Self {
            name: name.into(),
            specialty,
            position: rules.start_position.clamp(GOAL_LINE, OWN_END_LINE),
            plays_used: 0,
            max_plays: rules.max_plays,
            history: SmallVec::new(),
            logs: Vec::new(),
        }
    }

    /// Move the ball by a signed yardage. Positive values gain toward the
    /// goal line, zero or negative values lose ground. Returns the new
    /// position.
    pub fn apply_yards(&mut self, yards: i32) -> i32 {
        self.position = if yards > 0 {
            self.position.saturating_sub(yards).max(GOAL_LINE)
        } else {
            self.position
                .saturating_add(yards.saturating_neg())
                .min(OWN_END_LINE)
        };
        self.position
    }

    /// Commit a chosen play to the history and spend one attempt.
    pub fn record_play(&mut self, play: &Play) {
        self.history.push(play.id);
        self.plays_used = self.plays_used.saturating_add(1);
    }

    #[must_use]
    pub const fn is_at_goal(&self) -> bool {
        self.position <= GOAL_LINE
    }

    #[must_use]
    pub const fn is_out_of_plays(&self) -> bool {
        self.plays_used >= self.max_plays
    }

    #[must_use]
    pub const fn plays_remaining(&self) -> u32 {
        self.max_plays.saturating_sub(self.plays_used)
    }

    /// Yards still needed to score.
    #[must_use]
    pub const fn yards_to_goal(&self) -> i32 {
        self.position - GOAL_LINE
    }

    /// The last `count` plays in chronological order.
    pub fn recent_plays(&self, count: usize) -> impl Iterator<Item = &'static Play> + '_ {
        let skip = self.history.len().saturating_sub(count);
        self.history.iter().skip(skip).map(|id| id.play())
    }

    /// One-line stats readout for the UI.
    #[must_use]
    pub fn stats_summary(&self) -> String {
        let recent: Vec<&str> = self
            .recent_plays(STATS_HISTORY_TAIL)
            .map(|play| play.name)
            .collect();
        let recent = if recent.is_empty() {
            String::from("None")
        } else {
            recent.join(", ")
        };
        format!(
            "{} ({}) | Yard Line: {} | Plays Used: {}/{} | Last Plays: {}",
            self.name, self.specialty, self.position, self.plays_used, self.max_plays, recent
        )
    }

    pub(crate) fn push_log(&mut self, key: &str) {
        self.logs.push(key.to_string());
    }
}
