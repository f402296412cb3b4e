use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};
use gridiron_game::{DriveRules, Play, Slot, Specialty, TurnPrompt, specialty_bonus};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;

/// Decision returned by a [`PlayerPolicy`]
#[derive(Debug, Clone)]
pub struct PolicyDecision {
    pub slot: Slot,
    pub rationale: Option<String>,
}

impl PolicyDecision {
    #[must_use]
    pub fn new(slot: Slot, rationale: Option<String>) -> Self {
        Self { slot, rationale }
    }
}

/// Policy interface for automated play strategies.
pub trait PlayerPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Select one of the two offered plays.
    fn pick_play(
        &mut self,
        specialty: Specialty,
        rules: &DriveRules,
        prompt: &TurnPrompt,
    ) -> PolicyDecision;
}

/// Built-in gameplay strategies for automated drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameplayStrategy {
    Greedy,
    Specialist,
    Cautious,
    Random,
}

impl GameplayStrategy {
    pub const ALL: [Self; 4] = [Self::Greedy, Self::Specialist, Self::Cautious, Self::Random];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            GameplayStrategy::Greedy => "Greedy",
            GameplayStrategy::Specialist => "Specialist",
            GameplayStrategy::Cautious => "Cautious",
            GameplayStrategy::Random => "Random",
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn PlayerPolicy + Send> {
        match self {
            GameplayStrategy::Greedy => Box::new(GreedyPolicy),
            GameplayStrategy::Specialist => Box::new(SpecialistPolicy),
            GameplayStrategy::Cautious => Box::new(CautiousPolicy),
            GameplayStrategy::Random => Box::new(RandomPolicy::new(seed)),
        }
    }
}

impl fmt::Display for GameplayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GameplayStrategy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "greedy" => Ok(Self::Greedy),
            "specialist" => Ok(Self::Specialist),
            "cautious" => Ok(Self::Cautious),
            "random" => Ok(Self::Random),
            _ => Err(()),
        }
    }
}

/// Resolve CLI strategy names. `all` expands to every built-in strategy.
pub fn parse_strategies(tokens: &[String]) -> Result<Vec<GameplayStrategy>> {
    let mut strategies = Vec::new();
    for token in tokens {
        if token.eq_ignore_ascii_case("all") {
            strategies.extend(GameplayStrategy::ALL);
            continue;
        }
        let Ok(strategy) = token.parse::<GameplayStrategy>() else {
            bail!("Unknown strategy: {token}");
        };
        strategies.push(strategy);
    }
    strategies.sort_unstable();
    strategies.dedup();
    if strategies.is_empty() {
        strategies.extend(GameplayStrategy::ALL);
    }
    Ok(strategies)
}

fn expected_gain(play: &Play, specialty: Specialty, rules: &DriveRules) -> i32 {
    play.expected_yards() + specialty_bonus(play, specialty, rules)
}

fn slot_of(prompt: &TurnPrompt, play: &Play) -> Slot {
    if prompt.offer.first.id == play.id {
        Slot::First
    } else {
        Slot::Second
    }
}

struct GreedyPolicy;
struct SpecialistPolicy;
struct CautiousPolicy;

struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl PlayerPolicy for GreedyPolicy {
    fn name(&self) -> &'static str {
        "Greedy"
    }

    fn pick_play(
        &mut self,
        specialty: Specialty,
        rules: &DriveRules,
        prompt: &TurnPrompt,
    ) -> PolicyDecision {
        let [first, second] = prompt.offer.plays();
        let pick =
            if expected_gain(second, specialty, rules) > expected_gain(first, specialty, rules) {
                second
            } else {
                first
            };
        PolicyDecision::new(
            slot_of(prompt, pick),
            Some(format!("expected {}", expected_gain(pick, specialty, rules))),
        )
    }
}

impl PlayerPolicy for SpecialistPolicy {
    fn name(&self) -> &'static str {
        "Specialist"
    }

    fn pick_play(
        &mut self,
        specialty: Specialty,
        rules: &DriveRules,
        prompt: &TurnPrompt,
    ) -> PolicyDecision {
        let pick = prompt
            .offer
            .plays()
            .into_iter()
            .max_by_key(|play| {
                (
                    play.category == specialty.category(),
                    expected_gain(play, specialty, rules),
                )
            })
            .unwrap_or(prompt.offer.first);
        PolicyDecision::new(
            slot_of(prompt, pick),
            Some(format!("{} play", pick.category.as_str())),
        )
    }
}

impl PlayerPolicy for CautiousPolicy {
    fn name(&self) -> &'static str {
        "Cautious"
    }

    fn pick_play(
        &mut self,
        specialty: Specialty,
        rules: &DriveRules,
        prompt: &TurnPrompt,
    ) -> PolicyDecision {
        let pick = prompt
            .offer
            .plays()
            .into_iter()
            .min_by_key(|play| (play.variance, -expected_gain(play, specialty, rules)))
            .unwrap_or(prompt.offer.first);
        PolicyDecision::new(
            slot_of(prompt, pick),
            Some(format!("variance {}", pick.variance)),
        )
    }
}

impl PlayerPolicy for RandomPolicy {
    fn name(&self) -> &'static str {
        "Random"
    }

    fn pick_play(
        &mut self,
        _specialty: Specialty,
        _rules: &DriveRules,
        _prompt: &TurnPrompt,
    ) -> PolicyDecision {
        let slot = if self.rng.gen_bool(0.5) {
            Slot::First
        } else {
            Slot::Second
        };
        PolicyDecision::new(slot, None)
    }
}
