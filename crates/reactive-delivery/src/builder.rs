use crate::{RoadSpec, Scenario, ScenarioError, ScenarioSpec, TaskSpec, VehicleSpec};

#[derive(Debug, Clone, Default)]
/// Struct to build delivery scenarios in code
pub struct ScenarioBuilder {
    cities: Vec<String>,
    roads: Vec<RoadSpec>,
    tasks: Vec<TaskSpec>,
    vehicles: Vec<VehicleSpec>,
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a city. Cities are enumerated in insertion order.
    pub fn add_city(&mut self, name: impl Into<String>) -> &mut Self {
        self.cities.push(name.into());
        self
    }

    /// Add a two-way road between known cities.
    pub fn add_road(
        &mut self,
        from: impl AsRef<str>,
        to: impl AsRef<str>,
        distance: f64,
    ) -> Result<&mut Self, ScenarioError> {
        self.push_road(from.as_ref(), to.as_ref(), distance, false)
    }

    /// Add a road that can only be travelled from `from` to `to`.
    pub fn add_one_way_road(
        &mut self,
        from: impl AsRef<str>,
        to: impl AsRef<str>,
        distance: f64,
    ) -> Result<&mut Self, ScenarioError> {
        self.push_road(from.as_ref(), to.as_ref(), distance, true)
    }

    /// Declare that `from` offers a task to `to` with the given probability and reward.
    pub fn add_task(
        &mut self,
        from: impl AsRef<str>,
        to: impl AsRef<str>,
        probability: f64,
        reward: f64,
    ) -> Result<&mut Self, ScenarioError> {
        let from = self.known(from.as_ref())?;
        let to = self.known(to.as_ref())?;
        self.tasks.push(TaskSpec {
            from,
            to,
            probability,
            reward,
        });
        Ok(self)
    }

    pub fn add_vehicle(&mut self, name: impl Into<String>, cost_per_km: f64) -> &mut Self {
        self.vehicles.push(VehicleSpec {
            name: name.into(),
            cost_per_km,
        });
        self
    }

    pub fn build_spec(self) -> Result<ScenarioSpec, ScenarioError> {
        let spec = ScenarioSpec {
            version: Some(1),
            cities: self.cities,
            roads: self.roads,
            tasks: self.tasks,
            vehicles: self.vehicles,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn compile(self) -> Result<Scenario, ScenarioError> {
        let spec = self.build_spec()?;
        spec.compile()
    }

    fn push_road(
        &mut self,
        from: &str,
        to: &str,
        distance: f64,
        one_way: bool,
    ) -> Result<&mut Self, ScenarioError> {
        let from = self.known(from)?;
        let to = self.known(to)?;
        self.roads.push(RoadSpec {
            from,
            to,
            distance,
            one_way,
        });
        Ok(self)
    }

    fn known(&self, city: &str) -> Result<String, ScenarioError> {
        self.cities
            .iter()
            .find(|c| c.as_str() == city)
            .cloned()
            .ok_or_else(|| ScenarioError::BuilderUnknownCity {
                city: city.to_string(),
            })
    }
}
