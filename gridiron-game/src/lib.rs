//! Gridiron Drive Engine
//!
//! Platform-agnostic core logic for a single-drive football minigame: pick
//! one of two offered plays, resolve the yardage, and reach the goal line
//! before the plays run out. This crate has no UI or platform-specific
//! dependencies; front-ends plug in through [`InputSource`] and
//! [`OutputSink`].

pub mod catalog;
pub mod constants;
pub mod driver;
pub mod error;
pub mod result;
pub mod rng;
pub mod rules;
pub mod seed;
pub mod session;
pub mod state;
pub mod yardage;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use catalog::{
    CATALOG, Play, PlayCategory, PlayId, PlayOffer, Slot, catalog, find_by_name, random_play,
    two_distinct_plays,
};
pub use driver::{DriveEvent, InputSource, OutputSink, TurnPrompt, play_drive, run_drive};
pub use error::{SetupError, TurnError};
pub use result::{Ending, ResultSummary};
pub use rng::{CountingRng, Dice, RngBundle};
pub use rules::{DriveRules, RulesError};
pub use seed::{decode_share_code, share_code_for_seed, share_code_from_entropy};
pub use session::{ChoiceInput, DrivePhase, DriveSession, PlayResult, TurnOutcome};
pub use state::{PlayerState, Specialty};
pub use yardage::{YardageRoll, calculate_yards, roll_yards, specialty_bonus};
