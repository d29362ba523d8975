use std::collections::HashMap;

use reactive_core::StateId;

use crate::interner::CityKey;

/// Decision-point situation: the agent is in `city`, optionally offered a task to `destination`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State {
    pub city: CityKey,
    pub destination: Option<CityKey>,
}

/// Next city to occupy, and whether the offered task is carried there.
/// Compared by value so one action shares kernel and reward entries across states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlanAction {
    pub move_to: CityKey,
    pub delivering: bool,
}

impl PlanAction {
    pub fn travel(move_to: CityKey) -> Self {
        PlanAction {
            move_to,
            delivering: false,
        }
    }

    pub fn deliver(move_to: CityKey) -> Self {
        PlanAction {
            move_to,
            delivering: true,
        }
    }
}

/// All `(city, destination | none)` states with their admissible actions.
#[derive(Debug, Clone)]
pub struct StateSpace {
    states: Vec<State>,
    actions: Vec<Vec<PlanAction>>,
    by_city: Vec<Vec<StateId>>,
    index: HashMap<State, StateId>,
}

impl StateSpace {
    /// Enumerate states city by city: every other city as destination, then no offer.
    /// Actions are the neighbors in the given order, then the delivery when an offer exists.
    pub fn enumerate(neighbors: &[Vec<CityKey>]) -> Self {
        let n = neighbors.len();
        let mut space = StateSpace {
            states: Vec::with_capacity(n * n),
            actions: Vec::with_capacity(n * n),
            by_city: vec![Vec::with_capacity(n); n],
            index: HashMap::with_capacity(n * n),
        };

        for c in 0..n {
            let city = CityKey::from(c);
            let destinations = (0..n)
                .filter(|d| *d != c)
                .map(|d| Some(CityKey::from(d)))
                .chain(std::iter::once(None));

            for destination in destinations {
                let state = State { city, destination };
                let mut actions: Vec<PlanAction> =
                    neighbors[c].iter().copied().map(PlanAction::travel).collect();
                if let Some(dest) = destination {
                    actions.push(PlanAction::deliver(dest));
                }

                let id = StateId::from(space.states.len());
                space.states.push(state);
                space.actions.push(actions);
                space.by_city[c].push(id);
                space.index.insert(state, id);
            }
        }

        space
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn state(&self, id: StateId) -> Option<State> {
        self.states.get(id.index()).copied()
    }

    pub fn id_of(&self, state: &State) -> Option<StateId> {
        self.index.get(state).copied()
    }

    /// Admissible actions of a state, in tie-breaking order.
    pub fn possible_actions(&self, id: StateId) -> &[PlanAction] {
        self.actions
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// States located in `city`, in enumeration order.
    pub fn states_in(&self, city: CityKey) -> &[StateId] {
        self.by_city
            .get(city.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn action_count(&self) -> usize {
        self.actions.iter().map(Vec::len).sum()
    }
}
