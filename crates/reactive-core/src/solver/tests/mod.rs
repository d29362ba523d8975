mod bellman_tests;

use crate::{Model, ModelBuilder, StateId};

/// Two states, each forced to hop to the other at a cost of 10.
pub(super) fn forced_cycle() -> Model {
    let mut builder = ModelBuilder::new();
    let a = builder.add_state();
    let b = builder.add_state();
    let to_a = builder.add_distribution([(a, 1.0)]);
    let to_b = builder.add_distribution([(b, 1.0)]);
    builder.add_action(a, -10.0, to_b).expect("state a exists");
    builder.add_action(b, -10.0, to_a).expect("state b exists");
    builder.build().expect("model is valid")
}

/// One state with a low-reward and a high-reward self loop.
pub(super) fn two_armed_loop(low: f64, high: f64) -> (Model, StateId) {
    let mut builder = ModelBuilder::new();
    let s = builder.add_state();
    let stay = builder.add_distribution([(s, 1.0)]);
    builder.add_action(s, low, stay).expect("state exists");
    builder.add_action(s, high, stay).expect("state exists");
    (builder.build().expect("model is valid"), s)
}
