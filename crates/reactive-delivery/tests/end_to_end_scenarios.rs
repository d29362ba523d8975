use reactive_core::SolverConfig;
use reactive_delivery::{
    Decision, PlannedAction, ReactivePlanner, Scenario, ScenarioBuilder, Task,
};

fn solve(scenario: &Scenario, discount_factor: f64) -> ReactivePlanner<String> {
    let config = SolverConfig {
        epsilon_stop: 1e-9,
        ..SolverConfig::with_discount(discount_factor)
    };
    ReactivePlanner::setup(scenario, scenario, scenario, &config).expect("setup succeeds")
}

fn pair(task_probability: f64, task_reward: f64) -> Scenario {
    let mut builder = ScenarioBuilder::new();
    builder.add_city("A").add_city("B");
    builder.add_road("A", "B", 10.0).expect("cities exist");
    if task_probability > 0.0 {
        builder
            .add_task("A", "B", task_probability, task_reward)
            .expect("cities exist");
        builder
            .add_task("B", "A", task_probability, task_reward)
            .expect("cities exist");
    }
    builder.add_vehicle("truck", 1.0);
    builder.compile().expect("scenario is valid")
}

fn s(name: &str) -> String {
    name.to_string()
}

fn task(id: u64, pickup: &str, delivery: &str, reward: f64) -> Task<String> {
    Task {
        id,
        pickup: s(pickup),
        delivery: s(delivery),
        reward,
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn two_cities_without_tasks_bounce_forever() {
    let scenario = pair(0.0, 0.0);
    let planner = solve(&scenario, 0.9);

    assert_close(planner.value(&s("A"), None).expect("state exists"), -100.0);
    assert_close(planner.value(&s("B"), None).expect("state exists"), -100.0);

    assert_eq!(
        planner.decide(&s("A"), None).expect("policy complete"),
        Decision::Move(s("B"))
    );
    assert_eq!(
        planner.decide(&s("B"), None).expect("policy complete"),
        Decision::Move(s("A"))
    );
}

#[test]
fn guaranteed_tasks_are_always_delivered() {
    let scenario = pair(1.0, 50.0);
    let planner = solve(&scenario, 0.9);

    assert_close(planner.value(&s("A"), Some(&s("B"))).expect("state exists"), 400.0);
    assert_close(planner.value(&s("B"), Some(&s("A"))).expect("state exists"), 400.0);
    assert_close(planner.value(&s("A"), None).expect("state exists"), 350.0);

    let offer = task(7, "A", "B", 50.0);
    assert_eq!(
        planner.decide(&s("A"), Some(&offer)).expect("policy complete"),
        Decision::Deliver(offer.clone())
    );
    let back = task(8, "B", "A", 50.0);
    assert_eq!(
        planner.decide(&s("B"), Some(&back)).expect("policy complete"),
        Decision::Deliver(back.clone())
    );
}

#[test]
fn task_worth_less_than_travel_is_refused() {
    // B is a 10 km dead end; C is 1 km away. The only task goes to B and pays 5.
    let mut builder = ScenarioBuilder::new();
    builder.add_city("A").add_city("B").add_city("C");
    builder.add_road("A", "B", 10.0).expect("cities exist");
    builder.add_road("A", "C", 1.0).expect("cities exist");
    builder.add_task("A", "B", 1.0, 5.0).expect("cities exist");
    builder.add_vehicle("truck", 1.0);
    let scenario = builder.compile().expect("scenario is valid");
    let planner = solve(&scenario, 0.9);

    assert_eq!(
        planner
            .planned_action(&s("A"), Some(&s("B")))
            .expect("state exists"),
        PlannedAction {
            move_to: s("C"),
            delivering: false
        }
    );
    // Never delivering: shuttle A <-> C at 1 per hop.
    assert_close(planner.value(&s("A"), Some(&s("B"))).expect("state exists"), -10.0);

    let offer = task(1, "A", "B", 5.0);
    assert_eq!(
        planner.decide(&s("A"), Some(&offer)).expect("policy complete"),
        Decision::Move(s("C"))
    );
}

#[test]
fn triangle_routes_back_to_the_profitable_origin() {
    let mut builder = ScenarioBuilder::new();
    builder.add_city("A").add_city("B").add_city("C");
    builder.add_road("A", "B", 10.0).expect("cities exist");
    builder.add_road("B", "C", 10.0).expect("cities exist");
    builder.add_road("C", "A", 10.0).expect("cities exist");
    builder.add_task("A", "B", 1.0, 100.0).expect("cities exist");
    builder.add_task("B", "C", 0.5, 1.0).expect("cities exist");
    builder.add_vehicle("truck", 1.0);
    let scenario = builder.compile().expect("scenario is valid");
    let planner = solve(&scenario, 0.9);

    let deliver_b = PlannedAction {
        move_to: s("B"),
        delivering: true,
    };
    let go_to_a = PlannedAction {
        move_to: s("A"),
        delivering: false,
    };

    assert_eq!(
        planner.planned_action(&s("A"), Some(&s("B"))).expect("state exists"),
        deliver_b
    );
    assert_eq!(
        planner.planned_action(&s("B"), Some(&s("C"))).expect("state exists"),
        go_to_a
    );
    assert_eq!(planner.planned_action(&s("B"), None).expect("state exists"), go_to_a);
    assert_eq!(planner.planned_action(&s("C"), None).expect("state exists"), go_to_a);

    // V(A, B) = 90 + 0.9 * (-10 + 0.9 * V(A, B))
    let cycle = 81.0 / 0.19;
    assert_close(planner.value(&s("A"), Some(&s("B"))).expect("state exists"), cycle);
}

#[test]
fn zero_discount_is_purely_myopic() {
    let scenario = pair(1.0, 50.0);
    let planner = solve(&scenario, 0.0);

    assert_close(planner.value(&s("A"), Some(&s("B"))).expect("state exists"), 40.0);
    assert_close(planner.value(&s("A"), None).expect("state exists"), -10.0);

    let offer = task(3, "A", "B", 50.0);
    assert_eq!(
        planner.decide(&s("A"), Some(&offer)).expect("policy complete"),
        Decision::Deliver(offer.clone())
    );
}

#[test]
fn bounded_rewards_converge_within_five_hundred_sweeps() {
    let mut builder = ScenarioBuilder::new();
    for city in ["A", "B", "C", "D"] {
        builder.add_city(city);
    }
    builder.add_road("A", "B", 12.0).expect("cities exist");
    builder.add_road("B", "C", 7.0).expect("cities exist");
    builder.add_road("C", "D", 3.0).expect("cities exist");
    builder.add_road("D", "A", 9.0).expect("cities exist");
    builder.add_task("A", "C", 0.4, 60.0).expect("cities exist");
    builder.add_task("B", "D", 0.3, 25.0).expect("cities exist");
    builder.add_task("C", "A", 0.2, 40.0).expect("cities exist");
    builder.add_task("D", "B", 0.6, 15.0).expect("cities exist");
    builder.add_vehicle("truck", 1.0).add_vehicle("van", 0.5);
    let scenario = builder.compile().expect("scenario is valid");

    let config = SolverConfig {
        epsilon_stop: 1e-3,
        max_iterations: 500,
        ..SolverConfig::with_discount(0.95)
    };
    let planner =
        ReactivePlanner::setup(&scenario, &scenario, &scenario, &config).expect("setup succeeds");

    assert!(planner.convergence_warning().is_none());
    let metrics = planner.solution().metrics();
    assert!(metrics.converged);
    assert!(metrics.iterations <= 500);
    assert!(metrics.final_delta <= 1e-3);
}
