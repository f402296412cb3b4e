//! Centralized balance and tuning constants for the drive engine.
//!
//! These values define the deterministic math for a single drive. Rule
//! overrides loaded at runtime start from these defaults and are validated
//! against the field bounds below.

// Logging keys -------------------------------------------------------------
pub(crate) const LOG_PLAY_GAIN: &str = "log.play.gain";
pub(crate) const LOG_PLAY_LOSS: &str = "log.play.loss";
pub(crate) const LOG_PLAY_FUMBLE: &str = "log.play.fumble";
pub(crate) const LOG_DRIVE_TOUCHDOWN: &str = "log.drive.touchdown";
pub(crate) const LOG_DRIVE_OUT_OF_PLAYS: &str = "log.drive.out-of-plays";
pub(crate) const LOG_DRIVE_ABANDONED: &str = "log.drive.abandoned";

// Field geometry -----------------------------------------------------------
/// Goal line. Reaching it scores.
pub const GOAL_LINE: i32 = 0;
/// Own end of the field; losses never push the ball past it.
pub const OWN_END_LINE: i32 = 100;
pub const START_POSITION: i32 = 50;

// Drive limits -------------------------------------------------------------
pub const MAX_PLAYS: u32 = 6;
/// Number of plays listed in the stats line history tail.
pub const STATS_HISTORY_TAIL: usize = 3;

// Yardage tuning -----------------------------------------------------------
pub const SPECIALTY_BONUS_YARDS: i32 = 2;
/// A fumble happens on one outcome out of this many.
pub const FUMBLE_ONE_IN: i32 = 10;
pub const FUMBLE_LOSS_MIN: i32 = 1;
pub const FUMBLE_LOSS_MAX: i32 = 5;
/// No single play loses more than this many yards.
pub const YARDS_FLOOR: i32 = -10;
