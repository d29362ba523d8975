mod kernel_tests;
mod state_space_tests;

use crate::{CityKey, Scenario, ScenarioBuilder};

pub(super) fn keys(raw: &[usize]) -> Vec<CityKey> {
    raw.iter().copied().map(CityKey::from).collect()
}

/// A - B - C line, B is the hub.
pub(super) fn line() -> Scenario {
    let mut builder = ScenarioBuilder::new();
    builder.add_city("A").add_city("B").add_city("C");
    builder.add_road("A", "B", 4.0).expect("cities exist");
    builder.add_road("B", "C", 6.0).expect("cities exist");
    builder.add_task("A", "C", 0.5, 30.0).expect("cities exist");
    builder.add_task("B", "A", 0.25, 8.0).expect("cities exist");
    builder.add_vehicle("v0", 1.0).add_vehicle("v1", 3.0);
    builder.compile().expect("scenario is valid")
}
