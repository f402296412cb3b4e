//! Errors surfaced to the driver.
use thiserror::Error;

use crate::result::Ending;
use crate::rules::RulesError;

/// Setup problems that abort a drive before the first play.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("a player name is required")]
    MissingName,
    #[error("a specialty is required")]
    MissingSpecialty,
    #[error("specialty must be either 'passing' or 'running' (got '{0}')")]
    UnknownSpecialty(String),
    #[error("invalid drive rules: {0}")]
    Rules(#[from] RulesError),
}

/// Per-turn problems. None of them change the drive state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TurnError {
    #[error("invalid selection '{input}': enter 1 or 2 to select a play")]
    InvalidChoice { input: String },
    #[error("no plays have been offered for this turn")]
    NoOffer,
    #[error("the drive is over ({0})")]
    DriveOver(Ending),
}

impl TurnError {
    /// Whether the driver should simply prompt again.
    #[must_use]
    pub const fn is_reprompt(&self) -> bool {
        matches!(self, Self::InvalidChoice { .. })
    }
}
