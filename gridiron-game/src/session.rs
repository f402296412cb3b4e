use serde::{Deserialize, Serialize};

use crate::catalog::{PlayId, PlayOffer, Slot, two_distinct_plays};
use crate::constants::{
    LOG_DRIVE_ABANDONED, LOG_DRIVE_OUT_OF_PLAYS, LOG_DRIVE_TOUCHDOWN, LOG_PLAY_FUMBLE,
    LOG_PLAY_GAIN, LOG_PLAY_LOSS,
};
use crate::error::{SetupError, TurnError};
use crate::result::{Ending, ResultSummary};
use crate::rng::{Dice, RngBundle};
use crate::rules::DriveRules;
use crate::state::{PlayerState, Specialty};
use crate::yardage::{YardageRoll, roll_yards};

/// Lifecycle of a drive. Every phase but `InProgress` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DrivePhase {
    #[default]
    InProgress,
    Touchdown,
    OutOfPlays,
    Abandoned,
}

impl DrivePhase {
    #[must_use]
    pub const fn ending(self) -> Option<Ending> {
        match self {
            Self::InProgress => None,
            Self::Touchdown => Some(Ending::Touchdown),
            Self::OutOfPlays => Some(Ending::OutOfPlays),
            Self::Abandoned => Some(Ending::Abandoned),
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// A raw per-turn answer classified for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceInput {
    Pick(Slot),
    Abandon,
    Invalid(String),
}

impl ChoiceInput {
    /// Classify driver input: `"1"`/`"2"` pick, empty or absent abandons,
    /// anything else is invalid.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => Self::Abandon,
            Some("1") => Self::Pick(Slot::First),
            Some("2") => Self::Pick(Slot::Second),
            Some(other) => Self::Invalid(other.to_string()),
        }
    }
}

/// Everything that happened on one committed play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayResult {
    pub play: PlayId,
    pub slot: Slot,
    pub roll: YardageRoll,
    pub from: i32,
    pub to: i32,
    pub plays_used: u32,
    pub max_plays: u32,
    pub phase: DrivePhase,
}

impl PlayResult {
    #[must_use]
    pub const fn yards(&self) -> i32 {
        self.roll.yards
    }

    #[must_use]
    pub const fn is_gain(&self) -> bool {
        self.roll.yards > 0
    }
}

/// Outcome of a submitted choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Played(PlayResult),
    Abandoned,
}

/// One drive: player state, random source, and lifecycle phase.
#[derive(Debug, Clone)]
pub struct DriveSession<D = RngBundle> {
    player: PlayerState,
    rules: DriveRules,
    dice: D,
    phase: DrivePhase,
    offer: Option<PlayOffer>,
    fumbles: u32,
    share_code: Option<String>,
}

impl DriveSession<RngBundle> {
    /// Start a drive under the classic rules whose randomness replays from
    /// `seed`.
    ///
    /// # Errors
    ///
    /// Returns a [`SetupError`] when the name or specialty is rejected.
    pub fn seeded(name: &str, specialty: &str, seed: u64) -> Result<Self, SetupError> {
        Self::seeded_with_rules(name, specialty, DriveRules::default(), seed)
    }

    /// Seeded drive under custom rules.
    ///
    /// # Errors
    ///
    /// Returns a [`SetupError`] when setup input or the rules are rejected.
    pub fn seeded_with_rules(
        name: &str,
        specialty: &str,
        rules: DriveRules,
        seed: u64,
    ) -> Result<Self, SetupError> {
        Self::with_rules(name, specialty, rules, RngBundle::from_user_seed(seed))
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.dice.seed()
    }
}

impl<D: Dice> DriveSession<D> {
    /// Start a drive under the classic rules.
    ///
    /// # Errors
    ///
    /// Returns a [`SetupError`] when the name or specialty is rejected.
    pub fn new(name: &str, specialty: &str, dice: D) -> Result<Self, SetupError> {
        Self::with_rules(name, specialty, DriveRules::default(), dice)
    }

    /// Start a drive under custom rules.
    ///
    /// # Errors
    ///
    /// Returns a [`SetupError`] when setup input or the rules are rejected.
    pub fn with_rules(
        name: &str,
        specialty: &str,
        rules: DriveRules,
        dice: D,
    ) -> Result<Self, SetupError> {
        let name = validate_name(name)?;
        let specialty = Specialty::from_input(specialty)?;
        rules.validate()?;
        let player = PlayerState::with_rules(name, specialty, &rules);
        let share_code = dice.share_code();
        log::debug!(
            "drive created for {} ({specialty}) at the {} yard line",
            player.name,
            player.position
        );
        Ok(Self {
            player,
            rules,
            dice,
            phase: DrivePhase::InProgress,
            offer: None,
            fumbles: 0,
            share_code,
        })
    }

    /// Draw a fresh pair of distinct plays for the next turn, replacing any
    /// offer that is still pending.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError::DriveOver`] once the drive has ended.
    pub fn offer_plays(&mut self) -> Result<PlayOffer, TurnError> {
        self.ensure_in_progress()?;
        let offer = two_distinct_plays(&mut self.dice);
        self.offer = Some(offer);
        Ok(offer)
    }

    #[must_use]
    pub const fn pending_offer(&self) -> Option<PlayOffer> {
        self.offer
    }

    /// Apply a classified choice to the pending offer.
    ///
    /// # Errors
    ///
    /// Invalid input, a missing offer, or a finished drive are reported
    /// without touching the drive state.
    pub fn submit(&mut self, input: ChoiceInput) -> Result<TurnOutcome, TurnError> {
        self.ensure_in_progress()?;
        match input {
            ChoiceInput::Pick(slot) => self.choose(slot).map(TurnOutcome::Played),
            ChoiceInput::Abandon => {
                self.abandon()?;
                Ok(TurnOutcome::Abandoned)
            }
            ChoiceInput::Invalid(input) => Err(TurnError::InvalidChoice { input }),
        }
    }

    /// Commit the play in `slot`, resolve its yardage, and advance the phase.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError::NoOffer`] when no plays are pending and
    /// [`TurnError::DriveOver`] once the drive has ended.
    pub fn choose(&mut self, slot: Slot) -> Result<PlayResult, TurnError> {
        self.ensure_in_progress()?;
        let offer = self.offer.take().ok_or(TurnError::NoOffer)?;
        let play = offer.get(slot);

        self.player.record_play(play);
        let roll = roll_yards(play, self.player.specialty, &self.rules, &mut self.dice);
        let from = self.player.position;
        let to = self.player.apply_yards(roll.yards);

        if roll.fumbled() {
            self.fumbles = self.fumbles.saturating_add(1);
            self.player.push_log(LOG_PLAY_FUMBLE);
        } else if roll.yards > 0 {
            self.player.push_log(LOG_PLAY_GAIN);
        } else {
            self.player.push_log(LOG_PLAY_LOSS);
        }
        log::debug!(
            "{} used {}, yards gained: {}, position {from} -> {to}",
            self.player.name,
            play.name,
            roll.yards
        );

        self.phase = if self.player.is_at_goal() {
            self.finish(DrivePhase::Touchdown, LOG_DRIVE_TOUCHDOWN)
        } else if self.player.is_out_of_plays() {
            self.finish(DrivePhase::OutOfPlays, LOG_DRIVE_OUT_OF_PLAYS)
        } else {
            DrivePhase::InProgress
        };

        Ok(PlayResult {
            play: play.id,
            slot,
            roll,
            from,
            to,
            plays_used: self.player.plays_used,
            max_plays: self.player.max_plays,
            phase: self.phase,
        })
    }

    /// End the drive at the player's request.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError::DriveOver`] if the drive already ended.
    pub fn abandon(&mut self) -> Result<(), TurnError> {
        self.ensure_in_progress()?;
        self.offer = None;
        self.phase = self.finish(DrivePhase::Abandoned, LOG_DRIVE_ABANDONED);
        Ok(())
    }

    fn finish(&mut self, phase: DrivePhase, log_key: &str) -> DrivePhase {
        self.player.push_log(log_key);
        log::info!(
            "drive for {} ended: {phase:?} at the {} yard line after {} plays",
            self.player.name,
            self.player.position,
            self.player.plays_used
        );
        phase
    }

    fn ensure_in_progress(&self) -> Result<(), TurnError> {
        match self.phase.ending() {
            Some(ending) => Err(TurnError::DriveOver(ending)),
            None => Ok(()),
        }
    }

    #[must_use]
    pub const fn phase(&self) -> DrivePhase {
        self.phase
    }

    #[must_use]
    pub const fn ending(&self) -> Option<Ending> {
        self.phase.ending()
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    #[must_use]
    pub const fn player(&self) -> &PlayerState {
        &self.player
    }

    #[must_use]
    pub const fn rules(&self) -> &DriveRules {
        &self.rules
    }

    #[must_use]
    pub const fn dice(&self) -> &D {
        &self.dice
    }

    #[must_use]
    pub const fn fumbles(&self) -> u32 {
        self.fumbles
    }

    #[must_use]
    pub fn share_code(&self) -> Option<&str> {
        self.share_code.as_deref()
    }

    #[must_use]
    pub fn stats_summary(&self) -> String {
        self.player.stats_summary()
    }

    /// Final summary, once the drive has ended.
    #[must_use]
    pub fn summary(&self) -> Option<ResultSummary> {
        self.ending().map(|ending| {
            ResultSummary::build(
                &self.player,
                ending,
                self.rules.start_position,
                self.fumbles,
                self.share_code.clone(),
            )
        })
    }

    /// Consume the session, returning the underlying player state.
    #[must_use]
    pub fn into_player(self) -> PlayerState {
        self.player
    }
}

fn validate_name(raw: &str) -> Result<String, SetupError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(SetupError::MissingName);
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedDice;

    /// Offer Run wide / Run middle, then gain `variance` on Run wide.
    fn run_wide_turn(picks: &mut Vec<usize>, rolls: &mut Vec<i32>, variance: i32) {
        picks.extend([1, 0]);
        rolls.extend([variance, 5]);
    }

    #[test]
    fn setup_rejects_bad_input() {
        let dice = ScriptedDice::default;
        assert_eq!(
            DriveSession::new("", "running", dice()).err(),
            Some(SetupError::MissingName)
        );
        assert_eq!(
            DriveSession::new("   ", "running", dice()).err(),
            Some(SetupError::MissingName)
        );
        assert_eq!(
            DriveSession::new("Alex", "", dice()).err(),
            Some(SetupError::MissingSpecialty)
        );
        assert_eq!(
            DriveSession::new("Alex", "defense", dice()).err(),
            Some(SetupError::UnknownSpecialty("defense".into()))
        );
        let bad_rules = DriveRules {
            max_plays: 0,
            ..DriveRules::default()
        };
        assert!(matches!(
            DriveSession::with_rules("Alex", "running", bad_rules, dice()),
            Err(SetupError::Rules(_))
        ));
    }

    #[test]
    fn choice_input_classification() {
        assert_eq!(ChoiceInput::parse(None), ChoiceInput::Abandon);
        assert_eq!(ChoiceInput::parse(Some("")), ChoiceInput::Abandon);
        assert_eq!(ChoiceInput::parse(Some("1")), ChoiceInput::Pick(Slot::First));
        assert_eq!(ChoiceInput::parse(Some("2")), ChoiceInput::Pick(Slot::Second));
        assert_eq!(
            ChoiceInput::parse(Some("3")),
            ChoiceInput::Invalid("3".into())
        );
        assert_eq!(
            ChoiceInput::parse(Some(" 1")),
            ChoiceInput::Invalid(" 1".into())
        );
    }

    #[test]
    fn invalid_choice_changes_nothing() {
        let mut picks = Vec::new();
        let mut rolls = Vec::new();
        run_wide_turn(&mut picks, &mut rolls, 0);
        let mut session =
            DriveSession::new("Alex", "running", ScriptedDice::new(picks, rolls)).unwrap();
        session.offer_plays().unwrap();
        let before = session.player().clone();

        for raw in ["3", "abc"] {
            let err = session.submit(ChoiceInput::parse(Some(raw))).unwrap_err();
            assert!(err.is_reprompt());
            assert_eq!(session.player(), &before);
            assert_eq!(session.phase(), DrivePhase::InProgress);
        }

        let outcome = session.submit(ChoiceInput::Pick(Slot::First)).unwrap();
        let TurnOutcome::Played(result) = outcome else {
            panic!("expected a play");
        };
        assert_eq!(result.play, PlayId::RunWide);
        assert_eq!(result.yards(), 12);
        assert_eq!((result.from, result.to), (50, 38));
    }

    #[test]
    fn choosing_without_offer_is_rejected() {
        let mut session = DriveSession::new("Alex", "running", ScriptedDice::default()).unwrap();
        assert_eq!(session.choose(Slot::First), Err(TurnError::NoOffer));
        assert_eq!(session.player().plays_used, 0);
    }

    #[test]
    fn second_slot_picks_the_second_play() {
        // Short pass / Long pass; pick Long pass, variance -5, no fumble.
        let dice = ScriptedDice::new([2, 2], [-5, 9]);
        let mut session = DriveSession::new("Sam", "Passing", dice).unwrap();
        let offer = session.offer_plays().unwrap();
        assert_eq!(offer.first.id, PlayId::ShortPass);
        assert_eq!(offer.second.id, PlayId::LongPass);
        let result = session.choose(Slot::Second).unwrap();
        assert_eq!(result.yards(), 17);
        assert_eq!(session.player().history.as_slice(), &[PlayId::LongPass]);
        assert!(session.pending_offer().is_none());
    }

    #[test]
    fn touchdown_ends_drive_with_plays_left() {
        let mut picks = Vec::new();
        let mut rolls = Vec::new();
        for _ in 0..4 {
            run_wide_turn(&mut picks, &mut rolls, 3);
        }
        let mut session =
            DriveSession::new("Alex", "running", ScriptedDice::new(picks, rolls)).unwrap();

        while !session.is_over() {
            session.offer_plays().unwrap();
            session.choose(Slot::First).unwrap();
        }

        assert_eq!(session.phase(), DrivePhase::Touchdown);
        assert_eq!(session.player().position, 0);
        assert_eq!(session.player().plays_used, 4);
        assert!(session.player().logs.iter().any(|k| k == LOG_DRIVE_TOUCHDOWN));
        assert_eq!(
            session.offer_plays(),
            Err(TurnError::DriveOver(Ending::Touchdown))
        );
        let summary = session.summary().unwrap();
        assert_eq!(summary.ending, Ending::Touchdown);
        assert_eq!(summary.net_yards, 50);
    }

    #[test]
    fn abandon_is_terminal_without_state_change() {
        let dice = ScriptedDice::new([0, 0], []);
        let mut session = DriveSession::new("Alex", "running", dice).unwrap();
        session.offer_plays().unwrap();
        assert_eq!(
            session.submit(ChoiceInput::parse(None)),
            Ok(TurnOutcome::Abandoned)
        );
        assert_eq!(session.ending(), Some(Ending::Abandoned));
        assert_eq!(session.player().plays_used, 0);
        assert_eq!(session.player().position, 50);
        assert_eq!(
            session.submit(ChoiceInput::Pick(Slot::First)),
            Err(TurnError::DriveOver(Ending::Abandoned))
        );
    }

    #[test]
    fn fumbles_are_counted_and_logged() {
        // Run middle / Run wide; fumble for 3.
        let dice = ScriptedDice::new([0, 0], [1, 1, 3]);
        let mut session = DriveSession::new("Alex", "passing", dice).unwrap();
        session.offer_plays().unwrap();
        let result = session.choose(Slot::First).unwrap();
        assert!(result.roll.fumbled());
        assert_eq!(result.to, 53);
        assert_eq!(session.fumbles(), 1);
        assert_eq!(session.player().logs, vec![LOG_PLAY_FUMBLE.to_string()]);
    }

    #[test]
    fn seeded_sessions_replay_identically() {
        let play_out = |seed| {
            let mut session = DriveSession::seeded("Alex", "running", seed).unwrap();
            while !session.is_over() {
                session.offer_plays().unwrap();
                session.choose(Slot::First).unwrap();
            }
            (session.summary().unwrap(), session.dice().yardage_draws())
        };
        let seed = crate::seed::decode_share_code("GR-SPIRAL21").unwrap();
        let (first, draws_a) = play_out(seed);
        let (second, draws_b) = play_out(seed);
        assert_eq!(first, second);
        assert_eq!(draws_a, draws_b);
        assert_eq!(first.share_code.as_deref(), Some("GR-SPIRAL21"));
        assert!(play_out(99).0.share_code.is_none());
    }
}
