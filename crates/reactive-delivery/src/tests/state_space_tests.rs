use reactive_core::StateId;

use super::keys;
use crate::{CityKey, PlanAction, State, StateSpace};

#[test]
fn enumerates_every_city_destination_pair_plus_no_offer() {
    let neighbors = vec![keys(&[1]), keys(&[0, 2]), keys(&[1])];
    let space = StateSpace::enumerate(&neighbors);

    assert_eq!(space.len(), 9);
    let first_city: Vec<State> = space.states()[..3].to_vec();
    assert_eq!(
        first_city,
        vec![
            State {
                city: CityKey::from(0),
                destination: Some(CityKey::from(1))
            },
            State {
                city: CityKey::from(0),
                destination: Some(CityKey::from(2))
            },
            State {
                city: CityKey::from(0),
                destination: None
            },
        ]
    );
    assert!(space.states().iter().all(|s| s.destination != Some(s.city)));
}

#[test]
fn actions_list_neighbors_then_delivery() {
    let neighbors = vec![keys(&[1]), keys(&[2, 0]), keys(&[1])];
    let space = StateSpace::enumerate(&neighbors);

    let offered = space
        .id_of(&State {
            city: CityKey::from(1),
            destination: Some(CityKey::from(2)),
        })
        .expect("state exists");
    assert_eq!(
        space.possible_actions(offered),
        &[
            PlanAction::travel(CityKey::from(2)),
            PlanAction::travel(CityKey::from(0)),
            PlanAction::deliver(CityKey::from(2)),
        ]
    );

    let idle = space
        .id_of(&State {
            city: CityKey::from(1),
            destination: None,
        })
        .expect("state exists");
    assert_eq!(space.possible_actions(idle).len(), 2);
    assert_eq!(space.action_count(), (2 + 2 + 1) + (3 + 3 + 2) + (2 + 2 + 1));
}

#[test]
fn actions_compare_by_value() {
    let a = PlanAction::travel(CityKey::from(3));
    let b = PlanAction {
        move_to: CityKey::from(3),
        delivering: false,
    };
    assert_eq!(a, b);
    assert_ne!(a, PlanAction::deliver(CityKey::from(3)));

    let mut set = std::collections::HashSet::new();
    set.insert(a);
    assert!(set.contains(&b));
}

#[test]
fn states_are_grouped_by_city() {
    let neighbors = vec![keys(&[1]), keys(&[0])];
    let space = StateSpace::enumerate(&neighbors);
    assert_eq!(
        space.states_in(CityKey::from(1)),
        &[StateId::from(2), StateId::from(3)]
    );
    assert!(space.states_in(CityKey::from(5)).is_empty());
    assert!(space.possible_actions(StateId::from(40)).is_empty());
}
