mod builder;
mod dispatcher;
mod domain;
mod error;
mod interner;
mod io;
mod kernel;
mod planner;
mod reward;
mod scenario;
mod simulator;
mod snapshot;
mod spec;
mod state_space;

#[cfg(test)]
mod tests;

pub use builder::ScenarioBuilder;
pub use domain::{Decision, Fleet, PlannedAction, Task, TaskDistribution, Topology, Vehicle};
pub use error::{DispatchError, PlannerError, ScenarioError, SimulationError};
pub use interner::{CityInterner, CityKey};
pub use io::{compile_yaml, load_yaml, save_yaml};
pub use kernel::TransitionKernel;
pub use planner::ReactivePlanner;
pub use reward::{RewardTable, mean_cost_per_km};
pub use scenario::Scenario;
pub use simulator::{DeliverySimulator, ProfitReport, StepOutcome};
pub use snapshot::{PolicyEntry, PolicySnapshot};
pub use spec::{RoadSpec, ScenarioSpec, TaskSpec, VehicleSpec};
pub use state_space::{PlanAction, State, StateSpace};
