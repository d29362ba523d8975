use std::fmt::Display;
use std::hash::Hash;

use reactive_core::StateId;
use tracing::warn;

use crate::{
    PlannerError,
    domain::TaskDistribution,
    interner::{CityInterner, CityKey},
    state_space::{PlanAction, StateSpace},
};

const MASS_TOLERANCE: f64 = 1e-6;

/// `P(s' | a)`, keyed by the city the action lands in.
///
/// Moving to `c` and delivering to `c` share `D_c`: the next offer depends only on where the
/// agent is, not on how it got there.
#[derive(Debug, Clone)]
pub struct TransitionKernel {
    landing: Vec<Vec<(StateId, f64)>>,
}

impl TransitionKernel {
    /// Build one distribution per city from the task distribution.
    pub fn build<C, D>(
        cities: &CityInterner<C>,
        space: &StateSpace,
        tasks: &D,
    ) -> Result<Self, PlannerError>
    where
        C: Clone + Eq + Hash + Display,
        D: TaskDistribution<C>,
    {
        let mut landing = Vec::with_capacity(cities.len());

        for (key, city) in cities.iter() {
            let mut entries = Vec::with_capacity(space.states_in(key).len());
            for id in space.states_in(key) {
                let destination = space
                    .state(*id)
                    .and_then(|s| s.destination)
                    .and_then(|d| cities.get(d));
                let prob = tasks.probability(city, destination);
                if !prob.is_finite() || !(0.0..=1.0).contains(&prob) {
                    return Err(PlannerError::InvalidProbability {
                        from: city.to_string(),
                        to: destination.map_or_else(|| "no task".to_string(), |d| format!("'{d}'")),
                        value: prob,
                    });
                }
                entries.push((*id, prob));
            }

            let mass: f64 = entries.iter().map(|(_, p)| p).sum();
            if (mass - 1.0).abs() > MASS_TOLERANCE {
                warn!(
                    city = %city,
                    mass,
                    "task distribution is not normalized; using it as supplied"
                );
            }
            landing.push(entries);
        }

        Ok(TransitionKernel { landing })
    }

    /// Successor distribution of an action: `D_{action.move_to}`.
    pub fn get_transition(&self, action: &PlanAction) -> Result<&[(StateId, f64)], PlannerError> {
        self.landing_in(action.move_to)
            .ok_or(PlannerError::UnknownCity {
                city: action.move_to.index(),
            })
    }

    pub fn landing_in(&self, city: CityKey) -> Option<&[(StateId, f64)]> {
        self.landing.get(city.index()).map(Vec::as_slice)
    }

    /// Iterate `(landing city, distribution)` in city order.
    pub fn landings(&self) -> impl Iterator<Item = (CityKey, &[(StateId, f64)])> + '_ {
        self.landing
            .iter()
            .enumerate()
            .map(|(c, entries)| (CityKey::from(c), entries.as_slice()))
    }

    pub fn city_count(&self) -> usize {
        self.landing.len()
    }
}
