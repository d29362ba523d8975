use tracing::warn;

use crate::solver::{
    error::ModelError,
    ids::{ActionId, DistributionId, StateId},
};

/// Allowed drift of a distribution's total mass before a warning is logged.
pub(crate) const PROB_TOLERANCE: f64 = 1e-6;

/// Successor distribution `s' -> P(s' | a)` shared by every action that lands in the same place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Distribution {
    entries: Vec<(StateId, f64)>,
}

impl Distribution {
    pub fn new(entries: Vec<(StateId, f64)>) -> Self {
        Distribution { entries }
    }

    /// Borrow the `(successor, probability)` entries in insertion order.
    pub fn entries(&self) -> &[(StateId, f64)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total probability mass. Should be 1 for well-formed inputs.
    pub fn mass(&self) -> f64 {
        self.entries.iter().map(|(_, p)| p).sum()
    }

    /// Expected value `sum_s' P(s') * values[s']`.
    pub fn expectation(&self, values: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|(next, p)| p * values[next.index()])
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ActionRec {
    pub(crate) reward: f64,
    pub(crate) successors: DistributionId,
}

#[derive(Debug, Clone, PartialEq)]
/// Validated, immutable finite MDP.
///
/// Each state owns an ordered action list; actions point into a shared table of successor
/// distributions.
pub struct Model {
    states: Vec<Vec<ActionRec>>,
    distributions: Vec<Distribution>,
}

impl Model {
    /// Return the number of states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Return the number of shared successor distributions.
    pub fn distribution_count(&self) -> usize {
        self.distributions.len()
    }

    /// Iterate every state id in index order.
    pub fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        (0..self.states.len()).map(StateId::from)
    }

    /// Return how many actions are admissible in a state.
    pub fn num_actions(&self, state: StateId) -> Option<usize> {
        self.states.get(state.index()).map(Vec::len)
    }

    /// Immediate reward `R(s, a)`.
    pub fn reward(&self, state: StateId, action: ActionId) -> Option<f64> {
        self.action(state, action).map(|a| a.reward)
    }

    /// Successor distribution of `(s, a)`.
    pub fn successors(&self, state: StateId, action: ActionId) -> Option<&Distribution> {
        self.action(state, action)
            .and_then(|a| self.distributions.get(a.successors.index()))
    }

    /// Handle of the distribution used by `(s, a)`.
    pub fn distribution_of(&self, state: StateId, action: ActionId) -> Option<DistributionId> {
        self.action(state, action).map(|a| a.successors)
    }

    pub fn distribution(&self, id: DistributionId) -> Option<&Distribution> {
        self.distributions.get(id.index())
    }

    /// Total probability mass of a distribution.
    pub fn probability_mass(&self, id: DistributionId) -> Option<f64> {
        self.distribution(id).map(Distribution::mass)
    }

    /// Return a copy of the model with every reward passed through `f`.
    pub fn map_rewards<F>(&self, mut f: F) -> Result<Model, ModelError>
    where
        F: FnMut(f64) -> f64,
    {
        let mut states = self.states.clone();
        for (s, actions) in states.iter_mut().enumerate() {
            for (a, action) in actions.iter_mut().enumerate() {
                action.reward = f(action.reward);
                if !action.reward.is_finite() {
                    return Err(ModelError::InvalidReward {
                        state: StateId::from(s),
                        action: ActionId::from(a),
                        value: action.reward,
                    });
                }
            }
        }
        Ok(Model {
            states,
            distributions: self.distributions.clone(),
        })
    }

    pub(crate) fn actions_of(&self, state: StateId) -> &[ActionRec] {
        &self.states[state.index()]
    }

    pub(crate) fn distribution_unchecked(&self, id: DistributionId) -> &Distribution {
        &self.distributions[id.index()]
    }

    fn action(&self, state: StateId, action: ActionId) -> Option<&ActionRec> {
        self.states.get(state.index())?.get(action.index())
    }
}

#[derive(Debug, Clone, Default)]
/// Incremental construction of a `Model`.
pub struct ModelBuilder {
    states: Vec<Vec<ActionRec>>,
    distributions: Vec<Distribution>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a successor distribution and return its handle.
    pub fn add_distribution(
        &mut self,
        entries: impl IntoIterator<Item = (StateId, f64)>,
    ) -> DistributionId {
        let id = DistributionId::from(self.distributions.len());
        self.distributions
            .push(Distribution::new(entries.into_iter().collect()));
        id
    }

    /// Add a state with no actions yet.
    pub fn add_state(&mut self) -> StateId {
        let id = StateId::from(self.states.len());
        self.states.push(Vec::new());
        id
    }

    /// Append an action to a state. Action ids follow insertion order.
    pub fn add_action(
        &mut self,
        state: StateId,
        reward: f64,
        successors: DistributionId,
    ) -> Result<ActionId, ModelError> {
        let actions = self
            .states
            .get_mut(state.index())
            .ok_or(ModelError::UnknownState { state })?;
        actions.push(ActionRec { reward, successors });
        Ok(ActionId::from(actions.len() - 1))
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Validate and freeze the model.
    pub fn build(self) -> Result<Model, ModelError> {
        let state_count = self.states.len();

        for (d, distribution) in self.distributions.iter().enumerate() {
            let id = DistributionId::from(d);
            if distribution.is_empty() {
                return Err(ModelError::EmptyDistribution { distribution: id });
            }
            for (entry, (next, prob)) in distribution.entries().iter().enumerate() {
                if !prob.is_finite() || !(0.0..=1.0).contains(prob) {
                    return Err(ModelError::InvalidProbability {
                        distribution: id,
                        entry,
                        value: *prob,
                    });
                }
                if next.index() >= state_count {
                    return Err(ModelError::UnknownSuccessor {
                        distribution: id,
                        state: *next,
                    });
                }
            }

            // Inputs are consumed as supplied; contraction does not need exact stochasticity.
            let mass = distribution.mass();
            if (mass - 1.0).abs() > PROB_TOLERANCE {
                warn!(distribution = d, mass, "successor distribution is not normalized");
            }
        }

        for (s, actions) in self.states.iter().enumerate() {
            let state = StateId::from(s);
            if actions.is_empty() {
                return Err(ModelError::EmptyActionSet { state });
            }
            for (a, action) in actions.iter().enumerate() {
                let action_id = ActionId::from(a);
                if !action.reward.is_finite() {
                    return Err(ModelError::InvalidReward {
                        state,
                        action: action_id,
                        value: action.reward,
                    });
                }
                if action.successors.index() >= self.distributions.len() {
                    return Err(ModelError::UnknownDistribution {
                        state,
                        action: action_id,
                        distribution: action.successors,
                    });
                }
            }
        }

        Ok(Model {
            states: self.states,
            distributions: self.distributions,
        })
    }
}
