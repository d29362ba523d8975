//! Adapter contracts the planner consumes, and the values it hands back to the host.

use std::fmt::Display;
use std::hash::Hash;

/// City graph: finite cities, outgoing neighbors, pairwise distances.
pub trait Topology {
    type City: Clone + Eq + Ord + Hash + Display;

    /// All cities in a stable order. This order drives state enumeration.
    fn cities(&self) -> Vec<Self::City>;

    /// Outgoing neighbors of a city, in the order actions are enumerated.
    fn neighbors(&self, city: &Self::City) -> Vec<Self::City>;

    /// Travel distance in kilometers, `>= 0`.
    fn distance(&self, from: &Self::City, to: &Self::City) -> f64;
}

/// Task-appearance model over city pairs.
pub trait TaskDistribution<C> {
    /// Probability that the next offer in `from` is a task to `to`.
    /// `to = None` is the probability that no task is offered.
    fn probability(&self, from: &C, to: Option<&C>) -> f64;

    /// Expected payout of a task from `from` to `to`.
    fn reward(&self, from: &C, to: &C) -> f64;
}

pub trait Vehicle {
    fn cost_per_km(&self) -> f64;
}

/// The agent's vehicles. Costs are averaged over the whole fleet.
pub trait Fleet {
    type Vehicle: Vehicle;

    fn vehicles(&self) -> &[Self::Vehicle];
}

impl<V: Vehicle> Fleet for Vec<V> {
    type Vehicle = V;

    fn vehicles(&self) -> &[V] {
        self
    }
}

/// A delivery offered to the agent at a decision point.
#[derive(Debug, Clone, PartialEq)]
pub struct Task<C> {
    pub id: u64,
    pub pickup: C,
    pub delivery: C,
    pub reward: f64,
}

/// What the agent does at a decision point.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision<C> {
    /// Move to a neighboring city without a task.
    Move(C),
    /// Accept the offered task and carry it to its destination.
    Deliver(Task<C>),
}

/// Policy entry resolved back to host cities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedAction<C> {
    pub move_to: C,
    pub delivering: bool,
}
