use anyhow::{Context, Result};
use gridiron_game::{
    DriveEvent, DriveRules, DriveSession, Ending, InputSource, OutputSink, Specialty, TurnPrompt,
    play_drive,
};
use serde::Serialize;
use std::collections::BTreeMap;

use super::policy::{GameplayStrategy, PlayerPolicy};
use super::seeds::SeedInfo;

const BOT_NAME: &str = "Autopilot";

/// Everything needed to sweep strategies across seeds.
#[derive(Debug, Clone)]
pub struct SimulationPlan {
    pub strategies: Vec<GameplayStrategy>,
    pub seeds: Vec<SeedInfo>,
    pub iterations: usize,
    pub specialties: Vec<Specialty>,
    pub rules: DriveRules,
}

/// Outcome of one automated drive.
#[derive(Debug, Clone, Serialize)]
pub struct DriveRecord {
    pub strategy: GameplayStrategy,
    pub seed_label: String,
    pub seed_value: u64,
    pub iteration: usize,
    pub specialty: Specialty,
    pub ending: Ending,
    pub plays_used: u32,
    pub final_position: i32,
    pub net_yards: i32,
    pub fumbles: u32,
    pub plays: Vec<String>,
    /// Random draws taken from the offer and yardage streams.
    pub offer_draws: u64,
    pub yardage_draws: u64,
}

/// Per-strategy rollup of [`DriveRecord`]s.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyAggregate {
    pub strategy: GameplayStrategy,
    pub drives: usize,
    pub touchdowns: usize,
    pub touchdown_rate: f64,
    pub out_of_plays_rate: f64,
    pub mean_plays_used: f64,
    pub mean_final_position: f64,
    pub mean_net_yards: f64,
    pub fumbles: u32,
    pub fumbles_per_drive: f64,
}

/// Feeds policy decisions into the drive loop.
struct PolicyInput {
    policy: Box<dyn PlayerPolicy + Send>,
    specialty: Specialty,
    rules: DriveRules,
}

impl InputSource for PolicyInput {
    fn name(&mut self) -> Option<String> {
        Some(BOT_NAME.to_string())
    }

    fn specialty(&mut self) -> Option<String> {
        Some(self.specialty.as_str().to_string())
    }

    fn choice(&mut self, prompt: &TurnPrompt) -> Option<String> {
        let decision = self.policy.pick_play(self.specialty, &self.rules, prompt);
        log::trace!(
            "{} picks {} on play {}{}",
            self.policy.name(),
            prompt.offer.get(decision.slot).name,
            prompt.play_number,
            decision
                .rationale
                .map(|why| format!(" ({why})"))
                .unwrap_or_default()
        );
        Some(decision.slot.label().to_string())
    }
}

/// Discards UI output but counts rejected inputs.
#[derive(Default)]
struct QuietSink {
    rejected: usize,
}

impl OutputSink for QuietSink {
    fn event(&mut self, event: &DriveEvent<'_>) {
        if matches!(event, DriveEvent::InvalidChoice(_)) {
            self.rejected += 1;
        }
    }

    fn stats(&mut self, _line: &str) {}
}

/// Seed used for the `iteration`-th drive of a base seed.
#[must_use]
pub fn iteration_seed(base: u64, iteration: usize) -> u64 {
    base.wrapping_add(iteration as u64)
}

impl SimulationPlan {
    /// Number of drives the plan will play, saturating at `usize::MAX`.
    #[must_use]
    pub fn planned_drives(&self) -> usize {
        [self.seeds.len(), self.iterations, self.specialties.len()]
            .into_iter()
            .fold(self.strategies.len(), usize::saturating_mul)
    }
}

/// Play every strategy × seed × iteration × specialty combination.
pub fn run_simulation(plan: &SimulationPlan) -> Result<Vec<DriveRecord>> {
    log::info!("simulating {} drives", plan.planned_drives());
    let mut records = Vec::new();

    for &strategy in &plan.strategies {
        for seed_info in &plan.seeds {
            for iteration in 0..plan.iterations {
                let seed = iteration_seed(seed_info.seed, iteration);
                for &specialty in &plan.specialties {
                    let record =
                        simulate_drive(plan, strategy, seed_info, iteration, seed, specialty)
                            .with_context(|| {
                                format!(
                                    "{strategy} drive failed for seed {} (iteration {iteration})",
                                    seed_info.label()
                                )
                            })?;
                    records.push(record);
                }
            }
        }
        log::info!("finished {strategy} sweep");
    }

    Ok(records)
}

fn simulate_drive(
    plan: &SimulationPlan,
    strategy: GameplayStrategy,
    seed_info: &SeedInfo,
    iteration: usize,
    seed: u64,
    specialty: Specialty,
) -> Result<DriveRecord> {
    let mut input = PolicyInput {
        policy: strategy.create_policy(seed),
        specialty,
        rules: plan.rules.clone(),
    };
    let mut session =
        DriveSession::seeded_with_rules(BOT_NAME, specialty.as_str(), plan.rules.clone(), seed)?;
    let mut sink = QuietSink::default();
    let summary = play_drive(&mut session, &mut input, &mut sink);
    if sink.rejected > 0 {
        log::warn!("{strategy} produced {} rejected choices", sink.rejected);
    }
    let dice = session.dice();
    log::debug!(
        "{strategy} seed {seed}: {:?} after {} offer and {} yardage draws",
        summary.ending,
        dice.offer_draws(),
        dice.yardage_draws()
    );

    Ok(DriveRecord {
        strategy,
        seed_label: seed_info.label(),
        seed_value: seed,
        iteration,
        specialty,
        ending: summary.ending,
        plays_used: summary.plays_used,
        final_position: summary.final_position,
        net_yards: summary.net_yards,
        fumbles: summary.fumbles,
        plays: summary.plays,
        offer_draws: dice.offer_draws(),
        yardage_draws: dice.yardage_draws(),
    })
}

#[allow(clippy::cast_precision_loss)]
fn mean(total: i64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

/// Roll records up per strategy, in strategy order.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn aggregate_drives(records: &[DriveRecord]) -> Vec<StrategyAggregate> {
    let mut grouped: BTreeMap<GameplayStrategy, Vec<&DriveRecord>> = BTreeMap::new();
    for record in records {
        grouped.entry(record.strategy).or_default().push(record);
    }

    grouped
        .into_iter()
        .map(|(strategy, drives)| {
            let count = drives.len();
            let touchdowns = drives
                .iter()
                .filter(|r| r.ending == Ending::Touchdown)
                .count();
            let out_of_plays = drives
                .iter()
                .filter(|r| r.ending == Ending::OutOfPlays)
                .count();
            let plays: i64 = drives.iter().map(|r| i64::from(r.plays_used)).sum();
            let position: i64 = drives.iter().map(|r| i64::from(r.final_position)).sum();
            let net: i64 = drives.iter().map(|r| i64::from(r.net_yards)).sum();
            let fumbles: u32 = drives.iter().map(|r| r.fumbles).sum();

            StrategyAggregate {
                strategy,
                drives: count,
                touchdowns,
                touchdown_rate: mean(touchdowns as i64, count),
                out_of_plays_rate: mean(out_of_plays as i64, count),
                mean_plays_used: mean(plays, count),
                mean_final_position: mean(position, count),
                mean_net_yards: mean(net, count),
                fumbles,
                fumbles_per_drive: mean(i64::from(fumbles), count),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::seeds::resolve_seed_inputs;

    fn plan(strategies: Vec<GameplayStrategy>, iterations: usize) -> SimulationPlan {
        SimulationPlan {
            strategies,
            seeds: resolve_seed_inputs(&["1337".to_string(), "GR-BLITZ07".to_string()]).unwrap(),
            iterations,
            specialties: vec![Specialty::Running, Specialty::Passing],
            rules: DriveRules::default(),
        }
    }

    #[test]
    fn sweeps_every_combination() {
        let plan = plan(GameplayStrategy::ALL.to_vec(), 3);
        let records = run_simulation(&plan).unwrap();
        assert_eq!(records.len(), 4 * 2 * 3 * 2);
        for record in &records {
            assert_ne!(record.ending, Ending::Abandoned);
            assert!((1..=6).contains(&record.plays_used));
            assert!((0..=100).contains(&record.final_position));
            assert_eq!(record.net_yards, 50 - record.final_position);
            assert_eq!(record.plays.len(), record.plays_used as usize);
            // Each play draws one offer pair and at least variance plus fumble check.
            assert!(record.offer_draws >= u64::from(record.plays_used) * 2);
            assert!(record.yardage_draws >= u64::from(record.plays_used) * 2);
        }
    }

    #[test]
    fn simulation_is_reproducible() {
        let plan = plan(vec![GameplayStrategy::Random, GameplayStrategy::Greedy], 4);
        let first = run_simulation(&plan).unwrap();
        let second = run_simulation(&plan).unwrap();
        let endings = |records: &[DriveRecord]| {
            records
                .iter()
                .map(|r| (r.ending, r.final_position, r.plays.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(endings(&first), endings(&second));
        let draws = |records: &[DriveRecord]| {
            records
                .iter()
                .map(|r| (r.offer_draws, r.yardage_draws))
                .collect::<Vec<_>>()
        };
        assert_eq!(draws(&first), draws(&second));
    }

    #[test]
    fn aggregates_rates_per_strategy() {
        let plan = plan(vec![GameplayStrategy::Greedy, GameplayStrategy::Cautious], 5);
        let records = run_simulation(&plan).unwrap();
        let aggregates = aggregate_drives(&records);
        assert_eq!(aggregates.len(), 2);
        assert_eq!(aggregates[0].strategy, GameplayStrategy::Greedy);
        for aggregate in &aggregates {
            assert_eq!(aggregate.drives, 20);
            let total = aggregate.touchdown_rate + aggregate.out_of_plays_rate;
            assert!((total - 1.0).abs() < 1e-9);
            assert!((1.0..=6.0).contains(&aggregate.mean_plays_used));
        }
    }

    #[test]
    fn empty_records_aggregate_to_nothing() {
        assert!(aggregate_drives(&[]).is_empty());
        assert!((mean(3, 0)).abs() < f64::EPSILON);
    }

    #[test]
    fn planned_drive_count_saturates() {
        let mut plan = plan(GameplayStrategy::ALL.to_vec(), 3);
        assert_eq!(plan.planned_drives(), 4 * 2 * 3 * 2);
        plan.iterations = usize::MAX;
        assert_eq!(plan.planned_drives(), usize::MAX);
        plan.specialties.clear();
        assert_eq!(plan.planned_drives(), 0);
    }

    #[test]
    fn iteration_seeds_start_at_the_base() {
        assert_eq!(iteration_seed(10, 0), 10);
        assert_eq!(iteration_seed(u64::MAX, 1), 0);
    }
}
