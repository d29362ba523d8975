mod solver;

pub use solver::bellman::{backup, bellman_residual, greedy_policy, q_value};
pub use solver::config::{InitKind, SolverConfig, SolverConfigError, SweepMode};
pub use solver::error::{ModelError, SolveError};
pub use solver::ids::{ActionId, DistributionId, StateId};
pub use solver::model::{Distribution, Model, ModelBuilder};
pub use solver::snapshot::{SolutionSnapshot, StateSnapshot};
pub use solver::value_iteration::{
    ConvergenceWarning, Solution, SolveMetrics, SweepMetrics, ValueIteration,
};
