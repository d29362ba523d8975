use reactive_core::{ModelError, SolveError, SolverConfigError};
use thiserror::Error;

#[derive(Debug, Error)]
/// Error type for scenario loading, validation and compilation.
pub enum ScenarioError {
    #[error("failed to read YAML file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("scenario declares no cities")]
    NoCities,

    #[error("duplicate city '{city}'")]
    DuplicateCity { city: String },

    #[error("{context} references unknown city '{city}'")]
    UnknownCity { context: String, city: String },

    #[error("road from '{city}' leads back to itself")]
    SelfLoop { city: String },

    #[error("invalid distance on road '{from}' -> '{to}': {value}")]
    InvalidDistance { from: String, to: String, value: f64 },

    #[error("task from '{city}' is delivered in the same city")]
    SelfTask { city: String },

    #[error("duplicate task '{from}' -> '{to}'")]
    DuplicateTask { from: String, to: String },

    #[error("invalid probability for task '{from}' -> '{to}': {value}")]
    InvalidProbability { from: String, to: String, value: f64 },

    #[error("invalid reward for task '{from}' -> '{to}': {value}")]
    InvalidReward { from: String, to: String, value: f64 },

    #[error("task probabilities from '{city}' sum to {sum}, more than 1 + {tolerance}")]
    ProbabilitySum {
        city: String,
        sum: f64,
        tolerance: f64,
    },

    #[error("scenario declares no vehicles")]
    EmptyFleet,

    #[error("invalid cost per km for vehicle '{vehicle}': {value}")]
    InvalidVehicleCost { vehicle: String, value: f64 },

    #[error("city '{to}' is not reachable from '{from}'")]
    Unreachable { from: String, to: String },

    #[error("builder referenced unknown city '{city}'")]
    BuilderUnknownCity { city: String },
}

#[derive(Debug, Error)]
/// Error type for planner setup.
pub enum PlannerError {
    #[error("configuration error: {0}")]
    Config(#[from] SolverConfigError),

    #[error("configuration error: fleet has no vehicles")]
    EmptyFleet,

    #[error("configuration error: vehicle {index} has invalid cost per km {value}")]
    InvalidVehicleCost { index: usize, value: f64 },

    #[error("topology error: no cities")]
    EmptyTopology,

    #[error("topology error: city '{city}' is listed twice")]
    DuplicateCity { city: String },

    #[error("topology error: city '{city}' has no outgoing neighbors")]
    NoAdmissibleActions { city: String },

    #[error("topology error: city '{city}' lists neighbor '{neighbor}' outside the topology")]
    UnknownNeighbor { city: String, neighbor: String },

    #[error("topology error: invalid distance from '{from}' to '{to}': {value}")]
    InvalidDistance { from: String, to: String, value: f64 },

    #[error("task distribution error: invalid probability for '{from}' -> {to}: {value}")]
    InvalidProbability { from: String, to: String, value: f64 },

    #[error("task distribution error: invalid reward for '{from}' -> '{to}': {value}")]
    InvalidTaskReward { from: String, to: String, value: f64 },

    #[error("action targets city index {city} outside the topology")]
    UnknownCity { city: usize },

    #[error("failed to build planning model: {0}")]
    Model(#[from] ModelError),

    #[error("numeric error during value iteration: {0}")]
    Solve(#[from] SolveError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Error type for runtime decisions.
pub enum DispatchError {
    #[error("policy has no entry for city '{city}' with offered destination {destination}")]
    PolicyIncomplete { city: String, destination: String },
}

#[derive(Debug, Error)]
/// Error type for the seeded host simulator.
pub enum SimulationError {
    #[error("home city '{city}' is not part of the scenario")]
    UnknownHome { city: String },

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
