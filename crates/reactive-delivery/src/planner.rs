use std::collections::BTreeMap;
use std::fmt::Display;
use std::hash::Hash;

use reactive_core::{
    ActionId, ConvergenceWarning, DistributionId, Model, ModelBuilder, Solution, SolverConfig,
    StateId, ValueIteration, q_value,
};
use tracing::info;

use crate::{
    DispatchError, PlannerError,
    domain::{Fleet, PlannedAction, TaskDistribution, Topology},
    interner::CityInterner,
    kernel::TransitionKernel,
    reward::{RewardTable, mean_cost_per_km},
    snapshot::{PolicyEntry, PolicySnapshot},
    state_space::{PlanAction, State, StateSpace},
};

/// Offline planner: state space, kernel, rewards and the solved `(V*, pi*)`.
///
/// Everything is built once in [`ReactivePlanner::setup`] and never mutated afterwards, so a
/// planner can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct ReactivePlanner<C>
where
    C: Clone + Eq + Hash,
{
    cities: CityInterner<C>,
    space: StateSpace,
    kernel: TransitionKernel,
    rewards: RewardTable,
    model: Model,
    solution: Solution,
}

impl<C> ReactivePlanner<C>
where
    C: Clone + Eq + Ord + Hash + Display,
{
    /// Build the MDP from the adapters and solve it by value iteration.
    pub fn setup<T, D, F>(
        topology: &T,
        tasks: &D,
        fleet: &F,
        config: &SolverConfig,
    ) -> Result<Self, PlannerError>
    where
        T: Topology<City = C>,
        D: TaskDistribution<C>,
        F: Fleet,
    {
        config.validate()?;
        let cost_per_km = mean_cost_per_km(fleet)?;

        let mut cities = CityInterner::new();
        for city in topology.cities() {
            if cities.key_of(&city).is_some() {
                return Err(PlannerError::DuplicateCity {
                    city: city.to_string(),
                });
            }
            cities.intern(city);
        }
        if cities.is_empty() {
            return Err(PlannerError::EmptyTopology);
        }

        let mut neighbors = Vec::with_capacity(cities.len());
        for (_, city) in cities.iter() {
            let mut keys = Vec::new();
            for neighbor in topology.neighbors(city) {
                let key = cities.key_of(&neighbor).ok_or_else(|| {
                    PlannerError::UnknownNeighbor {
                        city: city.to_string(),
                        neighbor: neighbor.to_string(),
                    }
                })?;
                keys.push(key);
            }
            // (city, none) would have no admissible action.
            if keys.is_empty() {
                return Err(PlannerError::NoAdmissibleActions {
                    city: city.to_string(),
                });
            }
            neighbors.push(keys);
        }

        let space = StateSpace::enumerate(&neighbors);
        let kernel = TransitionKernel::build(&cities, &space, tasks)?;
        let rewards = RewardTable::build(topology, tasks, &cities, &space, cost_per_km)?;
        let model = build_model(&space, &kernel, &rewards)?;
        info!(
            cities = cities.len(),
            states = space.len(),
            actions = space.action_count(),
            cost_per_km,
            "reactive state space enumerated"
        );

        let solution = ValueIteration::new(&model, config)?.run()?;
        // The solver itself warns when max-iterations cuts it short.
        if solution.convergence_warning().is_none() {
            let metrics = solution.metrics();
            info!(
                iterations = metrics.iterations,
                delta = metrics.final_delta,
                discount_factor = config.discount_factor,
                "reactive policy solved"
            );
        }

        Ok(ReactivePlanner {
            cities,
            space,
            kernel,
            rewards,
            model,
            solution,
        })
    }

    /// Expected discounted profit `V*(city, destination)`.
    pub fn value(&self, city: &C, destination: Option<&C>) -> Result<f64, DispatchError> {
        let id = self.state_id(city, destination)?;
        self.solution
            .value(id)
            .ok_or_else(|| incomplete(city, destination))
    }

    /// `pi*(city, destination)` resolved to host cities.
    pub fn planned_action(
        &self,
        city: &C,
        destination: Option<&C>,
    ) -> Result<PlannedAction<C>, DispatchError> {
        let id = self.state_id(city, destination)?;
        self.policy_action(id)
            .and_then(|action| self.resolve(action))
            .ok_or_else(|| incomplete(city, destination))
    }

    /// One-step lookahead values of every admissible action under `V*`, in enumeration order.
    pub fn q_values(
        &self,
        city: &C,
        destination: Option<&C>,
    ) -> Result<Vec<(PlannedAction<C>, f64)>, DispatchError> {
        let id = self.state_id(city, destination)?;
        let gamma = self.solution.discount_factor();
        self.space
            .possible_actions(id)
            .iter()
            .enumerate()
            .map(|(a, action)| {
                let q = q_value(
                    &self.model,
                    self.solution.values(),
                    gamma,
                    id,
                    ActionId::from(a),
                );
                match (self.resolve(*action), q) {
                    (Some(planned), Some(q)) => Ok((planned, q)),
                    _ => Err(incomplete(city, destination)),
                }
            })
            .collect()
    }

    /// Value of standing in a city before the offer is drawn: `sum_d prob(c, d) * V*(c, d)`.
    pub fn city_values(&self) -> BTreeMap<C, f64> {
        self.kernel
            .landings()
            .filter_map(|(key, entries)| {
                let city = self.cities.get(key)?.clone();
                let value = entries
                    .iter()
                    .map(|(id, p)| p * self.solution.value(*id).unwrap_or(0.0))
                    .sum();
                Some((city, value))
            })
            .collect()
    }

    /// Present when value iteration stopped on `max-iterations`.
    pub fn convergence_warning(&self) -> Option<ConvergenceWarning> {
        self.solution.convergence_warning()
    }

    /// Serializable policy table keyed by city names.
    pub fn snapshot(&self) -> PolicySnapshot {
        let core = self.solution.snapshot();
        let states = core
            .states
            .iter()
            .filter_map(|entry| {
                let state = self.space.state(StateId::from(entry.state))?;
                let action = self.policy_action(StateId::from(entry.state))?;
                Some(PolicyEntry {
                    city: self.cities.get(state.city)?.to_string(),
                    destination: match state.destination {
                        Some(d) => Some(self.cities.get(d)?.to_string()),
                        None => None,
                    },
                    value: entry.value,
                    move_to: self.cities.get(action.move_to)?.to_string(),
                    delivering: action.delivering,
                })
            })
            .collect();

        PolicySnapshot {
            schema_version: core.schema_version,
            discount_factor: core.discount_factor,
            iterations: core.iterations,
            final_delta: core.final_delta,
            converged: core.converged,
            states,
        }
    }

    pub fn state_space(&self) -> &StateSpace {
        &self.space
    }

    pub fn kernel(&self) -> &TransitionKernel {
        &self.kernel
    }

    pub fn rewards(&self) -> &RewardTable {
        &self.rewards
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    pub fn cities(&self) -> &CityInterner<C> {
        &self.cities
    }

    /// Reconstruct the enumerated state for `(city, destination)`.
    pub(crate) fn state_id(
        &self,
        city: &C,
        destination: Option<&C>,
    ) -> Result<StateId, DispatchError> {
        let state = self
            .state_of(city, destination)
            .ok_or_else(|| incomplete(city, destination))?;
        self.space
            .id_of(&state)
            .ok_or_else(|| incomplete(city, destination))
    }

    pub(crate) fn policy_action(&self, id: StateId) -> Option<PlanAction> {
        let action = self.solution.action(id)?;
        self.space.possible_actions(id).get(action.index()).copied()
    }

    pub(crate) fn resolve(&self, action: PlanAction) -> Option<PlannedAction<C>> {
        Some(PlannedAction {
            move_to: self.cities.get(action.move_to)?.clone(),
            delivering: action.delivering,
        })
    }

    fn state_of(&self, city: &C, destination: Option<&C>) -> Option<State> {
        let city = self.cities.key_of(city)?;
        let destination = match destination {
            Some(d) => Some(self.cities.key_of(d)?),
            None => None,
        };
        Some(State { city, destination })
    }
}

fn build_model(
    space: &StateSpace,
    kernel: &TransitionKernel,
    rewards: &RewardTable,
) -> Result<Model, PlannerError> {
    let mut builder = ModelBuilder::new();
    for _ in space.states() {
        builder.add_state();
    }

    // One shared distribution per landing city; move and delivery actions both point at it.
    let landing: Vec<DistributionId> = kernel
        .landings()
        .map(|(_, entries)| builder.add_distribution(entries.iter().copied()))
        .collect();

    for (s, state) in space.states().iter().enumerate() {
        let id = StateId::from(s);
        for action in space.possible_actions(id) {
            kernel.get_transition(action)?;
            let unknown = || PlannerError::UnknownCity {
                city: action.move_to.index(),
            };
            let successors = landing
                .get(action.move_to.index())
                .copied()
                .ok_or_else(unknown)?;
            let reward = rewards.reward(state, action).ok_or_else(unknown)?;
            builder.add_action(id, reward, successors)?;
        }
    }

    Ok(builder.build()?)
}

pub(crate) fn incomplete<C: Display>(city: &C, destination: Option<&C>) -> DispatchError {
    DispatchError::PolicyIncomplete {
        city: city.to_string(),
        destination: destination.map_or_else(|| "none".to_string(), |d| format!("'{d}'")),
    }
}
