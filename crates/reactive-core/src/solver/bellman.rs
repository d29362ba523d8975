//! Bellman optimality operator over a dense `Model`.
//!
//! `(BV)(s) = max_a [ R(s, a) + gamma * sum_s' P(s' | a) V(s') ]`

use crate::solver::{
    error::SolveError,
    ids::{ActionId, StateId},
    model::Model,
};

/// One-step lookahead value of `(s, a)` under `values`.
pub fn q_value(
    model: &Model,
    values: &[f64],
    gamma: f64,
    state: StateId,
    action: ActionId,
) -> Option<f64> {
    if values.len() != model.state_count() {
        return None;
    }
    let reward = model.reward(state, action)?;
    let successors = model.successors(state, action)?;
    Some(reward + gamma * successors.expectation(values))
}

/// Apply the Bellman operator to a single state.
/// Returns the best q value and the first action that attains it.
pub fn backup(
    model: &Model,
    values: &[f64],
    gamma: f64,
    state: StateId,
) -> Result<(f64, ActionId), SolveError> {
    check_len(model, values)?;
    backup_unchecked(model, values, gamma, state)
}

/// Sup-norm distance `max_s |V(s) - (BV)(s)|`.
pub fn bellman_residual(model: &Model, values: &[f64], gamma: f64) -> Result<f64, SolveError> {
    check_len(model, values)?;
    let mut residual = 0.0_f64;
    for state in model.states() {
        let (best, _) = backup_unchecked(model, values, gamma, state)?;
        residual = residual.max((values[state.index()] - best).abs());
    }
    Ok(residual)
}

/// Greedy policy with respect to `values`, one action per state.
pub fn greedy_policy(
    model: &Model,
    values: &[f64],
    gamma: f64,
) -> Result<Vec<ActionId>, SolveError> {
    check_len(model, values)?;
    model
        .states()
        .map(|state| backup_unchecked(model, values, gamma, state).map(|(_, action)| action))
        .collect()
}

pub(crate) fn backup_unchecked(
    model: &Model,
    values: &[f64],
    gamma: f64,
    state: StateId,
) -> Result<(f64, ActionId), SolveError> {
    let mut best: Option<(f64, ActionId)> = None;

    for (a, action) in model.actions_of(state).iter().enumerate() {
        let action_id = ActionId::from(a);
        let expected = model
            .distribution_unchecked(action.successors)
            .expectation(values);
        let q = action.reward + gamma * expected;
        if !q.is_finite() {
            return Err(SolveError::NonFiniteValue {
                state,
                action: action_id,
            });
        }

        // Strict comparison keeps the first action on ties.
        best = match best {
            Some((best_q, best_action)) if best_q >= q => Some((best_q, best_action)),
            _ => Some((q, action_id)),
        };
    }

    best.ok_or(SolveError::EmptyActionSet { state })
}

pub(crate) fn check_len(model: &Model, values: &[f64]) -> Result<(), SolveError> {
    if values.len() != model.state_count() {
        return Err(SolveError::ValuesLength {
            expected: model.state_count(),
            got: values.len(),
        });
    }
    Ok(())
}
