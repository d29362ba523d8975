use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    ReactivePlanner, Scenario, SimulationError,
    domain::{Decision, Fleet, Task, TaskDistribution, Topology, Vehicle},
};

/// Running profit figures of a simulated vehicle.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfitReport {
    pub actions: u64,
    pub deliveries: u64,
    pub total_reward: f64,
    pub total_cost: f64,
}

impl ProfitReport {
    pub fn total_profit(&self) -> f64 {
        self.total_reward - self.total_cost
    }

    /// Profit per action, 0 before the first action.
    pub fn average_profit(&self) -> f64 {
        if self.actions == 0 {
            0.0
        } else {
            self.total_profit() / self.actions as f64
        }
    }
}

/// One decision tick: what was offered, what the planner chose, and what it earned.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub offered: Option<Task<String>>,
    pub decision: Decision<String>,
    pub profit: f64,
}

#[derive(Debug, Clone)]
/// Seeded host loop driving one vehicle with a solved planner.
pub struct DeliverySimulator {
    scenario: Scenario,
    planner: ReactivePlanner<String>,
    current: String,
    cost_per_km: f64,
    rng: ChaCha8Rng,
    next_task_id: u64,
    report: ProfitReport,
}

impl DeliverySimulator {
    /// Create a simulator with deterministic RNG seed. The first vehicle of the fleet is driven.
    pub fn new(
        scenario: Scenario,
        planner: ReactivePlanner<String>,
        home: impl Into<String>,
        seed: u64,
    ) -> Result<Self, SimulationError> {
        let home = home.into();
        if !scenario.contains(&home) {
            return Err(SimulationError::UnknownHome { city: home });
        }
        let cost_per_km = scenario
            .vehicles()
            .first()
            .map_or(0.0, Vehicle::cost_per_km);

        Ok(Self {
            scenario,
            planner,
            current: home,
            cost_per_km,
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_task_id: 0,
            report: ProfitReport::default(),
        })
    }

    pub fn current_city(&self) -> &str {
        &self.current
    }

    pub fn report(&self) -> &ProfitReport {
        &self.report
    }

    pub fn planner(&self) -> &ReactivePlanner<String> {
        &self.planner
    }

    /// Draw the next offer in the current city from the task distribution.
    pub fn draw_offer(&mut self) -> Option<Task<String>> {
        let sample = (self.rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        let mut cumulative = 0.0;

        for destination in self.scenario.city_names() {
            if *destination == self.current {
                continue;
            }
            cumulative += self
                .scenario
                .probability(&self.current, Some(destination));
            if sample < cumulative {
                let task = Task {
                    id: self.next_task_id,
                    pickup: self.current.clone(),
                    delivery: destination.clone(),
                    reward: self.scenario.reward(&self.current, destination),
                };
                self.next_task_id += 1;
                return Some(task);
            }
        }

        None
    }

    /// Run one decision tick and apply its cost and reward.
    pub fn step(&mut self) -> Result<StepOutcome, SimulationError> {
        let offered = self.draw_offer();
        let decision = self.planner.decide(&self.current, offered.as_ref())?;

        let (destination, reward) = match &decision {
            Decision::Deliver(task) => (task.delivery.clone(), task.reward),
            Decision::Move(city) => (city.clone(), 0.0),
        };
        let cost = self.scenario.distance(&self.current, &destination) * self.cost_per_km;

        debug!(
            from = %self.current,
            to = %destination,
            delivering = matches!(decision, Decision::Deliver(_)),
            reward,
            cost,
            "vehicle acted"
        );

        self.report.actions += 1;
        self.report.total_cost += cost;
        if matches!(decision, Decision::Deliver(_)) {
            self.report.deliveries += 1;
            self.report.total_reward += reward;
        }
        self.current = destination;

        info!(
            actions = self.report.actions,
            total_profit = self.report.total_profit(),
            average_profit = self.report.average_profit(),
            "profit after action"
        );

        Ok(StepOutcome {
            offered,
            decision,
            profit: reward - cost,
        })
    }

    /// Run `steps` decision ticks and return the accumulated report.
    pub fn run(&mut self, steps: usize) -> Result<ProfitReport, SimulationError> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(self.report.clone())
    }
}
