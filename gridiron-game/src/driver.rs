//! Driver loop binding a [`DriveSession`] to an external UI.
//!
//! The UI supplies answers through [`InputSource`] and receives
//! [`DriveEvent`]s plus a refreshed stats line through [`OutputSink`].
//! [`run_drive`] is the whole session: setup, turns, and the final result.

use crate::catalog::PlayOffer;
use crate::error::{SetupError, TurnError};
use crate::result::{Ending, ResultSummary};
use crate::rng::Dice;
use crate::rules::DriveRules;
use crate::session::{ChoiceInput, DriveSession, PlayResult, TurnOutcome};
use crate::state::Specialty;

/// Source of user answers. `None` means the user cancelled.
pub trait InputSource {
    fn name(&mut self) -> Option<String>;

    fn specialty(&mut self) -> Option<String>;

    fn choice(&mut self, prompt: &TurnPrompt) -> Option<String>;
}

/// Receiver for drive milestones and the running stats line.
pub trait OutputSink {
    fn event(&mut self, event: &DriveEvent<'_>);

    fn stats(&mut self, line: &str);
}

/// Data shown when asking for the next play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnPrompt {
    pub play_number: u32,
    pub max_plays: u32,
    pub position: i32,
    pub offer: PlayOffer,
}

impl TurnPrompt {
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Play {} of {}\nCurrent position: {} yard line\n\nChoose your play:\n1: {}\n2: {}\n\nEnter 1 or 2:",
            self.play_number,
            self.max_plays,
            self.position,
            self.offer.first.name,
            self.offer.second.name
        )
    }
}

/// Milestones reported to the UI.
#[derive(Debug, Clone, Copy)]
pub enum DriveEvent<'a> {
    Intro {
        name: &'a str,
        specialty: Specialty,
        position: i32,
        yards_to_goal: i32,
        max_plays: u32,
    },
    SetupRejected(&'a SetupError),
    InvalidChoice(&'a TurnError),
    PlayResolved {
        play_name: &'static str,
        result: &'a PlayResult,
    },
    Finished(&'a ResultSummary),
}

impl DriveEvent<'_> {
    /// Default wording for the event.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Intro {
                name,
                specialty,
                position,
                yards_to_goal,
                max_plays,
            } => format!(
                "Welcome, {name} ({specialty}). You are on the {position} yard line and must make it to the endzone ({yards_to_goal} yards) to win. You have {max_plays} plays."
            ),
            Self::SetupRejected(err) => format!("Setup failed: {err}"),
            Self::InvalidChoice(err) => format!("Invalid selection! {err}"),
            Self::PlayResolved { play_name, result } => {
                let yards = result.yards();
                let verdict = if result.is_gain() {
                    format!("SUCCESS!\nGained {yards} yards!")
                } else if result.roll.fumbled() {
                    format!("FUMBLE!\nLost {} yards!", yards.unsigned_abs())
                } else {
                    format!("LOSS!\nLost {} yards!", yards.unsigned_abs())
                };
                format!(
                    "{play_name} - {verdict}\nMoved from {} to {} yard line. ({}/{} plays used)",
                    result.from, result.to, result.plays_used, result.max_plays
                )
            }
            Self::Finished(summary) => match summary.ending {
                Ending::Touchdown => format!(
                    "{} {}\nFinal position: {}",
                    summary.headline,
                    summary.epilogue,
                    summary.final_position_label()
                ),
                Ending::OutOfPlays | Ending::Abandoned => {
                    format!("{} {}", summary.headline, summary.epilogue)
                }
            },
        }
    }
}

/// Run one complete drive against the given UI.
///
/// # Errors
///
/// Returns the [`SetupError`] that aborted the drive before the first play.
/// The error is also reported to `output`.
pub fn run_drive<I, O, D>(
    input: &mut I,
    output: &mut O,
    rules: DriveRules,
    dice: D,
) -> Result<ResultSummary, SetupError>
where
    I: InputSource + ?Sized,
    O: OutputSink + ?Sized,
    D: Dice,
{
    let mut session = setup(input, rules, dice).inspect_err(|err| {
        output.event(&DriveEvent::SetupRejected(err));
    })?;
    Ok(play_drive(&mut session, input, output))
}

/// Play an already created session to its end.
///
/// The session is left in its terminal phase so callers can inspect it.
pub fn play_drive<I, O, D>(
    session: &mut DriveSession<D>,
    input: &mut I,
    output: &mut O,
) -> ResultSummary
where
    I: InputSource + ?Sized,
    O: OutputSink + ?Sized,
    D: Dice,
{
    let player = session.player();
    output.event(&DriveEvent::Intro {
        name: &player.name,
        specialty: player.specialty,
        position: player.position,
        yards_to_goal: player.yards_to_goal(),
        max_plays: player.max_plays,
    });
    output.stats(&session.stats_summary());

    loop {
        if let Some(summary) = session.summary() {
            output.event(&DriveEvent::Finished(&summary));
            output.stats(&session.stats_summary());
            return summary;
        }

        let offer = match session.offer_plays() {
            Ok(offer) => offer,
            Err(err) => {
                log::warn!("offer refused: {err}");
                continue;
            }
        };
        let player = session.player();
        log::debug!(
            "{}: {} yards to go with {} plays remaining",
            player.name,
            player.yards_to_goal(),
            player.plays_remaining()
        );
        let prompt = TurnPrompt {
            play_number: player.plays_used + 1,
            max_plays: player.max_plays,
            position: player.position,
            offer,
        };
        let raw = input.choice(&prompt);

        match session.submit(ChoiceInput::parse(raw.as_deref())) {
            Ok(TurnOutcome::Played(result)) => {
                output.event(&DriveEvent::PlayResolved {
                    play_name: result.play.play().name,
                    result: &result,
                });
                output.stats(&session.stats_summary());
            }
            Ok(TurnOutcome::Abandoned) => {}
            Err(err) if err.is_reprompt() => output.event(&DriveEvent::InvalidChoice(&err)),
            Err(err) => log::warn!("turn rejected: {err}"),
        }
    }
}

fn setup<I, D>(input: &mut I, rules: DriveRules, dice: D) -> Result<DriveSession<D>, SetupError>
where
    I: InputSource + ?Sized,
    D: Dice,
{
    let name = input.name().unwrap_or_default();
    if name.trim().is_empty() {
        return Err(SetupError::MissingName);
    }
    let specialty = input.specialty().unwrap_or_default();
    DriveSession::with_rules(&name, &specialty, rules, dice)
}
