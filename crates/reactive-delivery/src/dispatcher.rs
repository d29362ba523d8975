use std::fmt::Display;
use std::hash::Hash;

use crate::{
    DispatchError,
    domain::{Decision, Task},
    planner::{ReactivePlanner, incomplete},
};

impl<C> ReactivePlanner<C>
where
    C: Clone + Eq + Ord + Hash + Display,
{
    /// Pick the action for the current decision tick.
    ///
    /// Pure lookup in the precomputed policy: `(current, offered.delivery)` is mapped back to its
    /// state and the prescribed action is returned. No fallback is substituted when the state is
    /// unknown, and an offer picked up elsewhere than `current` is rejected.
    pub fn decide(
        &self,
        current: &C,
        offered: Option<&Task<C>>,
    ) -> Result<Decision<C>, DispatchError> {
        let destination = offered.map(|task| &task.delivery);
        if offered.is_some_and(|task| task.pickup != *current) {
            return Err(incomplete(current, destination));
        }
        let planned = self.planned_action(current, destination)?;

        Ok(match (planned.delivering, offered) {
            (true, Some(task)) => Decision::Deliver(task.clone()),
            _ => Decision::Move(planned.move_to),
        })
    }
}
