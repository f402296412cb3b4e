pub mod policy;
pub mod reports;
pub mod seeds;
pub mod simulation;

pub use policy::parse_strategies;
pub use seeds::{SeedInfo, resolve_seed_inputs};
pub use simulation::{
    DriveRecord, SimulationPlan, StrategyAggregate, aggregate_drives, run_simulation,
};
