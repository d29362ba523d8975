use crate::{
    CityInterner, CityKey, PlanAction, PlannerError, StateSpace, TaskDistribution, Topology,
    TransitionKernel,
};

fn build(scenario: &crate::Scenario) -> (CityInterner<String>, StateSpace, TransitionKernel) {
    let mut cities = CityInterner::new();
    for city in scenario.cities() {
        cities.intern(city);
    }
    let neighbors: Vec<Vec<CityKey>> = cities
        .iter()
        .map(|(_, city)| {
            scenario
                .neighbors(city)
                .iter()
                .filter_map(|n| cities.key_of(n))
                .collect()
        })
        .collect();
    let space = StateSpace::enumerate(&neighbors);
    let kernel = TransitionKernel::build(&cities, &space, scenario).expect("probabilities valid");
    (cities, space, kernel)
}

#[test]
fn move_and_delivery_share_the_landing_distribution() {
    let scenario = super::line();
    let (_, _, kernel) = build(&scenario);

    let c = CityKey::from(2);
    let travel = kernel
        .get_transition(&PlanAction::travel(c))
        .expect("city exists");
    let deliver = kernel
        .get_transition(&PlanAction::deliver(c))
        .expect("city exists");
    assert_eq!(travel, deliver);
    assert_eq!(kernel.city_count(), 3);
}

#[test]
fn landing_distribution_follows_task_probabilities() {
    let scenario = super::line();
    let (cities, space, kernel) = build(&scenario);

    let a = CityKey::from(0);
    let entries = kernel.landing_in(a).expect("A exists");
    assert_eq!(entries.len(), 3);

    let mass: f64 = entries.iter().map(|(_, p)| p).sum();
    assert!((mass - 1.0).abs() < 1e-12);

    for (id, p) in entries {
        let state = space.state(*id).expect("state exists");
        assert_eq!(state.city, a);
        let from = cities.get(a).expect("A interned");
        let to = state.destination.and_then(|d| cities.get(d));
        assert_eq!(*p, scenario.probability(from, to));
    }

    // A offers C half the time, nothing otherwise.
    let none = entries
        .iter()
        .find(|(id, _)| space.state(*id).is_some_and(|s| s.destination.is_none()))
        .expect("no-offer state exists");
    assert_eq!(none.1, 0.5);
}

#[test]
fn unknown_landing_city_is_an_error() {
    let scenario = super::line();
    let (_, _, kernel) = build(&scenario);

    let err = kernel
        .get_transition(&PlanAction::travel(CityKey::from(7)))
        .expect_err("city 7 does not exist");
    assert!(matches!(err, PlannerError::UnknownCity { city: 7 }));
    assert!(kernel.landing_in(CityKey::from(7)).is_none());
}

struct Broken;

impl TaskDistribution<String> for Broken {
    fn probability(&self, _from: &String, to: Option<&String>) -> f64 {
        if to.is_some() { f64::NAN } else { 1.0 }
    }

    fn reward(&self, _from: &String, _to: &String) -> f64 {
        0.0
    }
}

#[test]
fn invalid_probability_is_rejected() {
    let scenario = super::line();
    let (cities, space, _) = build(&scenario);

    let err = TransitionKernel::build(&cities, &space, &Broken).expect_err("NaN probability");
    assert!(matches!(err, PlannerError::InvalidProbability { .. }));
}
