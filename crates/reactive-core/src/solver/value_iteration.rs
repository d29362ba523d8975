use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace, warn};

use crate::solver::{
    bellman::{backup_unchecked, check_len},
    config::{InitKind, SolverConfig, SolverConfigError, SweepMode},
    error::SolveError,
    ids::{ActionId, StateId},
    model::Model,
    snapshot::{SolutionSnapshot, StateSnapshot},
};

/// Metrics emitted after every sweep over the state space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepMetrics {
    pub iteration: usize,
    /// `max_s |V(s) - V_old(s)|` for this sweep.
    pub delta: f64,
}

/// Aggregate metrics for a complete solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveMetrics {
    pub iterations: usize,
    pub final_delta: f64,
    pub converged: bool,
}

/// Non-fatal: the iteration cap was hit before `delta <= epsilon_stop`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceWarning {
    pub iterations: usize,
    pub delta: f64,
    pub epsilon_stop: f64,
}

/// Value function and greedy policy produced by value iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    values: Vec<f64>,
    policy: Vec<ActionId>,
    metrics: SolveMetrics,
    discount_factor: f64,
    epsilon_stop: f64,
}

impl Solution {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn value(&self, state: StateId) -> Option<f64> {
        self.values.get(state.index()).copied()
    }

    pub fn policy(&self) -> &[ActionId] {
        &self.policy
    }

    /// Action prescribed for a state.
    pub fn action(&self, state: StateId) -> Option<ActionId> {
        self.policy.get(state.index()).copied()
    }

    pub fn metrics(&self) -> SolveMetrics {
        self.metrics
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    /// Present when the solve stopped on the iteration cap.
    pub fn convergence_warning(&self) -> Option<ConvergenceWarning> {
        if self.metrics.converged {
            None
        } else {
            Some(ConvergenceWarning {
                iterations: self.metrics.iterations,
                delta: self.metrics.final_delta,
                epsilon_stop: self.epsilon_stop,
            })
        }
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Serializable view of the solution.
    pub fn snapshot(&self) -> SolutionSnapshot {
        SolutionSnapshot {
            schema_version: 1,
            discount_factor: self.discount_factor,
            iterations: self.metrics.iterations,
            final_delta: self.metrics.final_delta,
            converged: self.metrics.converged,
            states: self
                .values
                .iter()
                .zip(&self.policy)
                .enumerate()
                .map(|(state, (value, action))| StateSnapshot {
                    state,
                    value: *value,
                    action: action.index(),
                })
                .collect(),
        }
    }
}

/// Value-iteration solver bound to one model and one configuration.
#[derive(Debug, Clone)]
pub struct ValueIteration<'a> {
    model: &'a Model,
    config: &'a SolverConfig,
}

impl<'a> ValueIteration<'a> {
    /// Validate the configuration and bind the solver.
    pub fn new(model: &'a Model, config: &'a SolverConfig) -> Result<Self, SolverConfigError> {
        config.validate()?;
        Ok(ValueIteration { model, config })
    }

    /// Initial value vector according to `config.init`.
    pub fn initial_values(&self) -> Vec<f64> {
        let n = self.model.state_count();
        match self.config.init {
            InitKind::Zero => vec![0.0; n],
            InitKind::Uniform => {
                let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
                // Top 53 bits only, so a draw never rounds up to 1.
                (0..n)
                    .map(|_| (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64)
                    .collect()
            }
        }
    }

    /// Solve from the configured initialization.
    pub fn run(&self) -> Result<Solution, SolveError> {
        self.run_from_with_hook(self.initial_values(), |_| {})
    }

    /// Solve and invoke a callback after every sweep.
    pub fn run_with_hook<FHook>(&self, on_sweep: FHook) -> Result<Solution, SolveError>
    where
        FHook: FnMut(&SweepMetrics),
    {
        self.run_from_with_hook(self.initial_values(), on_sweep)
    }

    /// Solve starting from a caller-supplied value vector.
    pub fn run_from(&self, initial: Vec<f64>) -> Result<Solution, SolveError> {
        self.run_from_with_hook(initial, |_| {})
    }

    pub fn run_from_with_hook<FHook>(
        &self,
        initial: Vec<f64>,
        mut on_sweep: FHook,
    ) -> Result<Solution, SolveError>
    where
        FHook: FnMut(&SweepMetrics),
    {
        check_len(self.model, &initial)?;
        if let Some((s, value)) = initial.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(SolveError::InvalidInitialValue {
                state: StateId::from(s),
                value: *value,
            });
        }

        let mut values = initial;
        let mut old = values.clone();
        let mut policy = vec![ActionId::from(0); values.len()];
        let mut iterations = 0;
        let mut delta = f64::INFINITY;

        while iterations < self.config.max_iterations {
            delta = match self.config.sweep {
                SweepMode::Synchronous => {
                    self.sweep_synchronous(&mut values, &mut old, &mut policy)?
                }
                SweepMode::InPlace => self.sweep_in_place(&mut values, &mut policy)?,
            };
            iterations += 1;

            let metrics = SweepMetrics {
                iteration: iterations,
                delta,
            };
            trace!(iteration = iterations, delta, "value iteration sweep");
            on_sweep(&metrics);

            if delta <= self.config.epsilon_stop {
                break;
            }
        }

        let converged = delta <= self.config.epsilon_stop;
        if converged {
            debug!(iterations, delta, "value iteration converged");
        } else {
            warn!(
                iterations,
                delta,
                epsilon_stop = self.config.epsilon_stop,
                "value iteration hit max-iterations before converging; keeping current policy"
            );
        }

        Ok(Solution {
            values,
            policy,
            metrics: SolveMetrics {
                iterations,
                final_delta: delta,
                converged,
            },
            discount_factor: self.config.discount_factor,
            epsilon_stop: self.config.epsilon_stop,
        })
    }

    fn sweep_synchronous(
        &self,
        values: &mut [f64],
        old: &mut [f64],
        policy: &mut [ActionId],
    ) -> Result<f64, SolveError> {
        old.copy_from_slice(values);
        let gamma = self.config.discount_factor;
        let mut delta = 0.0_f64;

        for state in self.model.states() {
            let (best, action) = backup_unchecked(self.model, old, gamma, state)?;
            let s = state.index();
            delta = delta.max((best - old[s]).abs());
            values[s] = best;
            policy[s] = action;
        }

        Ok(delta)
    }

    fn sweep_in_place(
        &self,
        values: &mut [f64],
        policy: &mut [ActionId],
    ) -> Result<f64, SolveError> {
        let gamma = self.config.discount_factor;
        let mut delta = 0.0_f64;

        for state in self.model.states() {
            let (best, action) = backup_unchecked(self.model, values, gamma, state)?;
            let s = state.index();
            delta = delta.max((best - values[s]).abs());
            values[s] = best;
            policy[s] = action;
        }

        Ok(delta)
    }
}
