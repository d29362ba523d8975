use std::path::PathBuf;

use reactive_core::SolverConfig;
use reactive_delivery::{DeliverySimulator, ReactivePlanner, compile_yaml};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("reactive_delivery=info".parse().expect("valid directive")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("crates/reactive-delivery/scenarios/triangle.yaml"));
    let steps: usize = std::env::args()
        .nth(2)
        .map(|s| s.parse().expect("steps must be a number"))
        .unwrap_or(100);

    let scenario = compile_yaml(&path).expect("failed to compile scenario YAML");
    let config = SolverConfig::from_default_yaml().expect("bundled solver config is valid");
    let planner = ReactivePlanner::setup(&scenario, &scenario, &scenario, &config)
        .expect("planner setup failed");

    for (city, value) in planner.city_values() {
        println!("{city:>12}: {value:.2}");
    }

    let home = scenario
        .city_names()
        .first()
        .cloned()
        .expect("scenario has at least one city");
    let mut simulator =
        DeliverySimulator::new(scenario, planner, home, 12345).expect("home city exists");
    let report = simulator.run(steps).expect("simulation failed");

    println!(
        "actions={} deliveries={} total_profit={:.2} average_profit={:.2}",
        report.actions,
        report.deliveries,
        report.total_profit(),
        report.average_profit()
    );
}
