use std::collections::HashMap;

use reactive_core::StateId;

use crate::{
    PlannerError,
    domain::{Fleet, TaskDistribution, Topology, Vehicle},
    interner::{CityInterner, CityKey},
    state_space::{PlanAction, State, StateSpace},
};

/// Mean cost per kilometer over the fleet.
pub fn mean_cost_per_km<F: Fleet>(fleet: &F) -> Result<f64, PlannerError> {
    let vehicles = fleet.vehicles();
    if vehicles.is_empty() {
        return Err(PlannerError::EmptyFleet);
    }

    let mut total = 0.0;
    for (index, vehicle) in vehicles.iter().enumerate() {
        let value = vehicle.cost_per_km();
        if !value.is_finite() || value < 0.0 {
            return Err(PlannerError::InvalidVehicleCost { index, value });
        }
        total += value;
    }
    Ok(total / vehicles.len() as f64)
}

/// `R(s, a) = -avg_cost(s.city, a.move_to) + [a.delivering] * reward(s.city, a.move_to)`.
#[derive(Debug, Clone)]
pub struct RewardTable {
    cost_per_km: f64,
    distances: HashMap<(CityKey, CityKey), f64>,
    payouts: HashMap<(CityKey, CityKey), f64>,
}

impl RewardTable {
    /// Precompute distances and payouts for every `(state, action)` pair in the space.
    pub fn build<T, D>(
        topology: &T,
        tasks: &D,
        cities: &CityInterner<T::City>,
        space: &StateSpace,
        cost_per_km: f64,
    ) -> Result<Self, PlannerError>
    where
        T: Topology,
        D: TaskDistribution<T::City>,
    {
        let mut table = RewardTable {
            cost_per_km,
            distances: HashMap::new(),
            payouts: HashMap::new(),
        };

        for (s, state) in space.states().iter().enumerate() {
            let from = state.city;
            for action in space.possible_actions(StateId::from(s)) {
                let pair = (from, action.move_to);
                let (Some(from_city), Some(to_city)) =
                    (cities.get(from), cities.get(action.move_to))
                else {
                    return Err(PlannerError::UnknownCity {
                        city: action.move_to.index(),
                    });
                };

                if !table.distances.contains_key(&pair) {
                    let value = topology.distance(from_city, to_city);
                    if !value.is_finite() || value < 0.0 {
                        return Err(PlannerError::InvalidDistance {
                            from: from_city.to_string(),
                            to: to_city.to_string(),
                            value,
                        });
                    }
                    table.distances.insert(pair, value);
                }

                if action.delivering && !table.payouts.contains_key(&pair) {
                    let value = tasks.reward(from_city, to_city);
                    if !value.is_finite() || value < 0.0 {
                        return Err(PlannerError::InvalidTaskReward {
                            from: from_city.to_string(),
                            to: to_city.to_string(),
                            value,
                        });
                    }
                    table.payouts.insert(pair, value);
                }
            }
        }

        Ok(table)
    }

    /// Fleet-averaged travel cost between two cities.
    pub fn avg_cost(&self, from: CityKey, to: CityKey) -> Option<f64> {
        self.distances
            .get(&(from, to))
            .map(|distance| distance * self.cost_per_km)
    }

    pub fn reward(&self, state: &State, action: &PlanAction) -> Option<f64> {
        let cost = self.avg_cost(state.city, action.move_to)?;
        let payout = if action.delivering {
            *self.payouts.get(&(state.city, action.move_to))?
        } else {
            0.0
        };
        Some(payout - cost)
    }

    pub fn cost_per_km(&self) -> f64 {
        self.cost_per_km
    }
}
