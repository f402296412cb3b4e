//! End-of-drive result calculation
use serde::{Deserialize, Serialize};

use crate::constants::GOAL_LINE;
use crate::state::{PlayerState, Specialty};

/// Terminal drive outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ending {
    /// Ball reached the goal line
    Touchdown,
    /// Every play was spent short of the goal line
    OutOfPlays,
    /// Player declined to continue
    Abandoned,
}

impl Ending {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Touchdown => "touchdown",
            Self::OutOfPlays => "out_of_plays",
            Self::Abandoned => "abandoned",
        }
    }

    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Touchdown)
    }
}

impl std::fmt::Display for Ending {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete summary of a drive for the end screen and reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub ending: Ending,
    pub headline: String,
    pub epilogue: String,
    pub name: String,
    pub specialty: Specialty,
    pub final_position: i32,
    pub plays_used: u32,
    pub max_plays: u32,
    /// Net yards gained from the starting spot; negative on a losing drive.
    pub net_yards: i32,
    pub fumbles: u32,
    pub plays: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_code: Option<String>,
}

impl ResultSummary {
    #[must_use]
    pub fn build(
        player: &PlayerState,
        ending: Ending,
        start_position: i32,
        fumbles: u32,
        share_code: Option<String>,
    ) -> Self {
        let (headline, epilogue) = ending_text(player, ending);
        Self {
            ending,
            headline,
            epilogue,
            name: player.name.clone(),
            specialty: player.specialty,
            final_position: player.position,
            plays_used: player.plays_used,
            max_plays: player.max_plays,
            net_yards: start_position - player.position,
            fumbles,
            plays: player
                .history
                .iter()
                .map(|id| id.play().name.to_string())
                .collect(),
            share_code,
        }
    }

    /// "ENDZONE!" at the goal line, otherwise the yard line.
    #[must_use]
    pub fn final_position_label(&self) -> String {
        if self.final_position <= GOAL_LINE {
            String::from("ENDZONE!")
        } else {
            format!("{} yard line", self.final_position)
        }
    }
}

fn ending_text(player: &PlayerState, ending: Ending) -> (String, String) {
    match ending {
        Ending::Touchdown => (
            String::from("TOUCHDOWN!"),
            format!(
                "{} reached the endzone in {} plays!",
                player.name, player.plays_used
            ),
        ),
        Ending::OutOfPlays => (
            String::from("Game Over!"),
            format!(
                "{} ran out of plays! Final position: {} yard line. You needed to reach the {} yard line to score.",
                player.name, player.position, GOAL_LINE
            ),
        ),
        Ending::Abandoned => (
            String::from("Drive abandoned"),
            String::from("Game ended by player choice."),
        ),
    }
}
