use std::fmt;

use crate::solver::ids::{ActionId, DistributionId, StateId};

/// Error type for model construction and validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A state was declared without any admissible action.
    EmptyActionSet { state: StateId },
    /// An action was attached to a state that was never added.
    UnknownState { state: StateId },
    /// A distribution entry points to a state that does not exist.
    UnknownSuccessor {
        distribution: DistributionId,
        state: StateId,
    },
    /// An action references a distribution that was never added.
    UnknownDistribution {
        state: StateId,
        action: ActionId,
        distribution: DistributionId,
    },
    /// A distribution has no entries at all.
    EmptyDistribution { distribution: DistributionId },
    /// Probability is NaN, infinite, negative or above one.
    InvalidProbability {
        distribution: DistributionId,
        entry: usize,
        value: f64,
    },
    /// Immediate reward is NaN or infinite.
    InvalidReward {
        state: StateId,
        action: ActionId,
        value: f64,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::EmptyActionSet { state } => {
                write!(f, "state {} has no admissible actions", state.index())
            }
            ModelError::UnknownState { state } => {
                write!(f, "unknown state {}", state.index())
            }
            ModelError::UnknownSuccessor {
                distribution,
                state,
            } => write!(
                f,
                "distribution {} references unknown successor state {}",
                distribution.index(),
                state.index()
            ),
            ModelError::UnknownDistribution {
                state,
                action,
                distribution,
            } => write!(
                f,
                "action {} of state {} references unknown distribution {}",
                action.index(),
                state.index(),
                distribution.index()
            ),
            ModelError::EmptyDistribution { distribution } => {
                write!(f, "distribution {} has no entries", distribution.index())
            }
            ModelError::InvalidProbability {
                distribution,
                entry,
                value,
            } => write!(
                f,
                "invalid probability {value} at entry {entry} of distribution {}",
                distribution.index()
            ),
            ModelError::InvalidReward {
                state,
                action,
                value,
            } => write!(
                f,
                "invalid reward {value} for action {} of state {}",
                action.index(),
                state.index()
            ),
        }
    }
}

impl std::error::Error for ModelError {}

/// Error type for value iteration.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// A Bellman backup produced NaN or an infinite value.
    NonFiniteValue { state: StateId, action: ActionId },
    /// A state reached the solver without actions.
    EmptyActionSet { state: StateId },
    /// A value vector does not cover the state space.
    ValuesLength { expected: usize, got: usize },
    /// A warm-start value is NaN or infinite.
    InvalidInitialValue { state: StateId, value: f64 },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::NonFiniteValue { state, action } => write!(
                f,
                "non-finite q value for action {} of state {}",
                action.index(),
                state.index()
            ),
            SolveError::EmptyActionSet { state } => {
                write!(f, "state {} has no admissible actions", state.index())
            }
            SolveError::ValuesLength { expected, got } => write!(
                f,
                "value vector has {got} entries, model has {expected} states"
            ),
            SolveError::InvalidInitialValue { state, value } => write!(
                f,
                "initial value {value} for state {} is not finite",
                state.index()
            ),
        }
    }
}

impl std::error::Error for SolveError {}
