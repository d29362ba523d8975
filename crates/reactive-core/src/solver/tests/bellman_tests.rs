use crate::{ActionId, SolveError, StateId, backup, bellman_residual, greedy_policy, q_value};

#[test]
fn q_value_combines_reward_and_discounted_successor() {
    let model = super::forced_cycle();
    let values = [3.0, 7.0];
    let q = q_value(&model, &values, 0.5, StateId::from(0), ActionId::from(0))
        .expect("action exists");
    assert!((q - (-10.0 + 0.5 * 7.0)).abs() < 1e-12);

    assert_eq!(
        q_value(&model, &values, 0.5, StateId::from(0), ActionId::from(1)),
        None
    );
    assert_eq!(
        q_value(&model, &[0.0], 0.5, StateId::from(0), ActionId::from(0)),
        None
    );
}

#[test]
fn ties_keep_first_enumerated_action() {
    let (model, s) = super::two_armed_loop(1.0, 1.0);
    let (best, action) = backup(&model, &[0.0], 0.9, s).expect("backup succeeds");
    assert_eq!(best, 1.0);
    assert_eq!(action, ActionId::from(0));
}

#[test]
fn backup_picks_highest_q() {
    let (model, s) = super::two_armed_loop(1.0, 2.0);
    let (best, action) = backup(&model, &[5.0], 0.5, s).expect("backup succeeds");
    assert!((best - 4.5).abs() < 1e-12);
    assert_eq!(action, ActionId::from(1));
}

#[test]
fn residual_is_zero_at_fixed_point() {
    let model = super::forced_cycle();
    let fixed = [-100.0, -100.0];
    let residual = bellman_residual(&model, &fixed, 0.9).expect("lengths match");
    assert!(residual < 1e-9);

    let off = [0.0, 0.0];
    let residual = bellman_residual(&model, &off, 0.9).expect("lengths match");
    assert!((residual - 10.0).abs() < 1e-12);
}

#[test]
fn nan_values_are_fatal() {
    let model = super::forced_cycle();
    let err = backup(&model, &[0.0, f64::NAN], 0.9, StateId::from(0))
        .expect_err("NaN propagates into q");
    assert_eq!(
        err,
        SolveError::NonFiniteValue {
            state: StateId::from(0),
            action: ActionId::from(0)
        }
    );
}

#[test]
fn length_mismatch_is_reported() {
    let model = super::forced_cycle();
    let err = greedy_policy(&model, &[0.0], 0.9).expect_err("one value for two states");
    assert_eq!(err, SolveError::ValuesLength { expected: 2, got: 1 });
}
