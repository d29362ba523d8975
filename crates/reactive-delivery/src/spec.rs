use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{Scenario, ScenarioError};

/// Allowed excess of the per-city task probability total over 1.
pub(crate) const PROB_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
/// Serializable delivery scenario: topology, task distribution and fleet.
pub struct ScenarioSpec {
    /// Schema version for future compatibility checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    /// City names, in the order states are enumerated.
    pub cities: Vec<String>,
    pub roads: Vec<RoadSpec>,
    /// Task offers. Missing pairs have probability 0; the remainder per city is "no task".
    #[serde(default)]
    pub tasks: Vec<TaskSpec>,
    pub vehicles: Vec<VehicleSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
/// A road between two cities. Roads are two-way unless `one-way` is set.
pub struct RoadSpec {
    pub from: String,
    pub to: String,
    pub distance: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub one_way: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
/// Probability that `from` offers a task to `to`, and its expected reward.
pub struct TaskSpec {
    pub from: String,
    pub to: String,
    pub probability: f64,
    pub reward: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct VehicleSpec {
    pub name: String,
    pub cost_per_km: f64,
}

impl ScenarioSpec {
    /// Validate names, ranges and probability totals.
    /// Reachability needs the road graph and is checked by `compile`.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.cities.is_empty() {
            return Err(ScenarioError::NoCities);
        }

        let mut names = HashSet::with_capacity(self.cities.len());
        for city in &self.cities {
            if !names.insert(city.as_str()) {
                return Err(ScenarioError::DuplicateCity { city: city.clone() });
            }
        }

        let known = |context: &str, city: &str| {
            if names.contains(city) {
                Ok(())
            } else {
                Err(ScenarioError::UnknownCity {
                    context: context.to_string(),
                    city: city.to_string(),
                })
            }
        };

        for road in &self.roads {
            known("road", &road.from)?;
            known("road", &road.to)?;
            if road.from == road.to {
                return Err(ScenarioError::SelfLoop {
                    city: road.from.clone(),
                });
            }
            if !road.distance.is_finite() || road.distance < 0.0 {
                return Err(ScenarioError::InvalidDistance {
                    from: road.from.clone(),
                    to: road.to.clone(),
                    value: road.distance,
                });
            }
        }

        let mut pairs = HashSet::with_capacity(self.tasks.len());
        let mut totals: HashMap<&str, f64> = HashMap::new();
        for task in &self.tasks {
            known("task", &task.from)?;
            known("task", &task.to)?;
            if task.from == task.to {
                return Err(ScenarioError::SelfTask {
                    city: task.from.clone(),
                });
            }
            if !pairs.insert((task.from.as_str(), task.to.as_str())) {
                return Err(ScenarioError::DuplicateTask {
                    from: task.from.clone(),
                    to: task.to.clone(),
                });
            }
            if !task.probability.is_finite() || !(0.0..=1.0).contains(&task.probability) {
                return Err(ScenarioError::InvalidProbability {
                    from: task.from.clone(),
                    to: task.to.clone(),
                    value: task.probability,
                });
            }
            if !task.reward.is_finite() || task.reward < 0.0 {
                return Err(ScenarioError::InvalidReward {
                    from: task.from.clone(),
                    to: task.to.clone(),
                    value: task.reward,
                });
            }
            *totals.entry(task.from.as_str()).or_insert(0.0) += task.probability;
        }

        // Offers in a city are mutually exclusive; whatever is left is the no-task case.
        for city in &self.cities {
            let sum = totals.get(city.as_str()).copied().unwrap_or(0.0);
            if sum > 1.0 + PROB_TOLERANCE {
                return Err(ScenarioError::ProbabilitySum {
                    city: city.clone(),
                    sum,
                    tolerance: PROB_TOLERANCE,
                });
            }
        }

        if self.vehicles.is_empty() {
            return Err(ScenarioError::EmptyFleet);
        }
        for vehicle in &self.vehicles {
            if !vehicle.cost_per_km.is_finite() || vehicle.cost_per_km < 0.0 {
                return Err(ScenarioError::InvalidVehicleCost {
                    vehicle: vehicle.name.clone(),
                    value: vehicle.cost_per_km,
                });
            }
        }

        Ok(())
    }

    /// Compile this spec into the adapters the planner consumes.
    pub fn compile(&self) -> Result<Scenario, ScenarioError> {
        Scenario::from_spec(self)
    }
}
