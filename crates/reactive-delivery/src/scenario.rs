use std::collections::HashMap;

use petgraph::algo::dijkstra;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::{
    ScenarioError, ScenarioSpec, VehicleSpec,
    domain::{Fleet, TaskDistribution, Topology, Vehicle},
};

/// Compiled scenario: resolved neighbors, all-pairs shortest distances and task tables.
///
/// Implements the topology, task-distribution and fleet adapters over `String` city names.
#[derive(Debug, Clone)]
pub struct Scenario {
    cities: Vec<String>,
    city_index: HashMap<String, usize>,
    neighbors: Vec<Vec<usize>>,
    distances: Vec<Vec<f64>>,
    probabilities: Vec<Vec<f64>>,
    no_task: Vec<f64>,
    rewards: Vec<Vec<f64>>,
    vehicles: Vec<VehicleSpec>,
}

impl Scenario {
    pub(crate) fn from_spec(spec: &ScenarioSpec) -> Result<Self, ScenarioError> {
        spec.validate()?;

        let n = spec.cities.len();
        let city_index: HashMap<String, usize> = spec
            .cities
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        let index_of = |name: &str, context: &str| {
            city_index
                .get(name)
                .copied()
                .ok_or_else(|| ScenarioError::UnknownCity {
                    context: context.to_string(),
                    city: name.to_string(),
                })
        };

        let mut graph: DiGraph<usize, f64> = DiGraph::with_capacity(n, spec.roads.len() * 2);
        let nodes: Vec<NodeIndex> = (0..n).map(|i| graph.add_node(i)).collect();
        let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); n];

        for road in &spec.roads {
            let from = index_of(&road.from, "road")?;
            let to = index_of(&road.to, "road")?;
            let mut link = |a: usize, b: usize| {
                graph.add_edge(nodes[a], nodes[b], road.distance);
                if !neighbors[a].contains(&b) {
                    neighbors[a].push(b);
                }
            };
            link(from, to);
            if !road.one_way {
                link(to, from);
            }
        }

        let mut distances = vec![vec![0.0; n]; n];
        for (from, row) in distances.iter_mut().enumerate() {
            let reached = dijkstra(&graph, nodes[from], None, |edge| *edge.weight());
            for (to, cell) in row.iter_mut().enumerate() {
                *cell = reached
                    .get(&nodes[to])
                    .copied()
                    .ok_or_else(|| ScenarioError::Unreachable {
                        from: spec.cities[from].clone(),
                        to: spec.cities[to].clone(),
                    })?;
            }
        }

        let mut probabilities = vec![vec![0.0; n]; n];
        let mut rewards = vec![vec![0.0; n]; n];
        for task in &spec.tasks {
            let from = index_of(&task.from, "task")?;
            let to = index_of(&task.to, "task")?;
            probabilities[from][to] = task.probability;
            rewards[from][to] = task.reward;
        }
        let no_task = probabilities
            .iter()
            .map(|row| (1.0 - row.iter().sum::<f64>()).max(0.0))
            .collect();

        Ok(Scenario {
            cities: spec.cities.clone(),
            city_index,
            neighbors,
            distances,
            probabilities,
            no_task,
            rewards,
            vehicles: spec.vehicles.clone(),
        })
    }

    pub fn city_names(&self) -> &[String] {
        &self.cities
    }

    pub fn contains(&self, city: &str) -> bool {
        self.city_index.contains_key(city)
    }

    fn index(&self, city: &str) -> Option<usize> {
        self.city_index.get(city).copied()
    }
}

impl Topology for Scenario {
    type City = String;

    fn cities(&self) -> Vec<String> {
        self.cities.clone()
    }

    fn neighbors(&self, city: &String) -> Vec<String> {
        self.index(city)
            .map(|i| {
                self.neighbors[i]
                    .iter()
                    .map(|j| self.cities[*j].clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Shortest-path distance over the road graph. Unknown cities are infinitely far.
    fn distance(&self, from: &String, to: &String) -> f64 {
        match (self.index(from), self.index(to)) {
            (Some(i), Some(j)) => self.distances[i][j],
            _ => f64::INFINITY,
        }
    }
}

impl TaskDistribution<String> for Scenario {
    fn probability(&self, from: &String, to: Option<&String>) -> f64 {
        let Some(i) = self.index(from) else {
            return 0.0;
        };
        match to {
            None => self.no_task[i],
            Some(to) => self.index(to).map_or(0.0, |j| self.probabilities[i][j]),
        }
    }

    fn reward(&self, from: &String, to: &String) -> f64 {
        match (self.index(from), self.index(to)) {
            (Some(i), Some(j)) => self.rewards[i][j],
            _ => 0.0,
        }
    }
}

impl Vehicle for VehicleSpec {
    fn cost_per_km(&self) -> f64 {
        self.cost_per_km
    }
}

impl Fleet for Scenario {
    type Vehicle = VehicleSpec;

    fn vehicles(&self) -> &[VehicleSpec] {
        &self.vehicles
    }
}
