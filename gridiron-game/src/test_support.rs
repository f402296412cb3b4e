use std::collections::VecDeque;

use crate::rng::Dice;

/// Dice that replay fixed draws. Panics when a script runs dry.
#[derive(Debug, Default)]
pub struct ScriptedDice {
    picks: VecDeque<usize>,
    rolls: VecDeque<i32>,
}

impl ScriptedDice {
    pub fn new(
        picks: impl IntoIterator<Item = usize>,
        rolls: impl IntoIterator<Item = i32>,
    ) -> Self {
        Self {
            picks: picks.into_iter().collect(),
            rolls: rolls.into_iter().collect(),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.picks.is_empty() && self.rolls.is_empty()
    }
}

impl Dice for ScriptedDice {
    fn pick(&mut self, len: usize) -> usize {
        let idx = self.picks.pop_front().expect("pick script exhausted");
        assert!(idx < len, "scripted pick {idx} out of 0..{len}");
        idx
    }

    fn roll(&mut self, low: i32, high: i32) -> i32 {
        let value = self.rolls.pop_front().expect("roll script exhausted");
        assert!(
            (low..=high).contains(&value),
            "scripted roll {value} out of {low}..={high}"
        );
        value
    }
}
