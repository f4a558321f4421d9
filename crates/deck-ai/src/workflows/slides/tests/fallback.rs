use super::common::*;
use crate::workflows::slides::matching::fallback::fallback_pick;
use crate::workflows::slides::matching::{SeededSelection, SelectionRng};

#[test]
fn prefers_capacity_sufficient_templates() {
    let pool = vec![template("tiny", 1), template("fits", 5)];
    let rng = SeededSelection::new(42);

    // Only one template fits, every seed must land on it.
    for _ in 0..8 {
        let picked = fallback_pick(&content(4), &pool, &rng).expect("non-empty pool");
        assert_eq!(picked.id.0, "fits");
    }
}

#[test]
fn random_pick_stays_within_the_sufficient_set() {
    let pool = vec![
        template("small", 1),
        template("a", 4),
        template("b", 5),
        template("c", 6),
    ];
    let rng = SeededSelection::new(3);

    for _ in 0..16 {
        let picked = fallback_pick(&content(3), &pool, &rng).expect("non-empty pool");
        assert_ne!(picked.id.0, "small");
    }
}

#[test]
fn same_seed_picks_the_same_template() {
    let pool = vec![template("a", 4), template("b", 4), template("c", 4)];

    let first = fallback_pick(&content(2), &pool, &SeededSelection::new(11))
        .expect("non-empty pool");
    let second = fallback_pick(&content(2), &pool, &SeededSelection::new(11))
        .expect("non-empty pool");

    assert_eq!(first.id, second.id);
}

#[test]
fn all_too_small_falls_back_to_largest_capacity() {
    let pool = vec![template("two", 2), template("four", 4), template("three", 3)];
    let rng = SeededSelection::new(42);

    let picked = fallback_pick(&content(6), &pool, &rng).expect("non-empty pool");

    assert_eq!(picked.id.0, "four");
}

#[test]
fn largest_capacity_ties_resolve_to_first_seen() {
    let pool = vec![template("first", 4), template("second", 4)];
    let rng = SeededSelection::new(42);

    let picked = fallback_pick(&content(6), &pool, &rng).expect("non-empty pool");

    assert_eq!(picked.id.0, "first");
}

#[test]
fn empty_pool_yields_nothing() {
    let rng = SeededSelection::new(42);
    assert!(fallback_pick(&content(3), &[], &rng).is_none());
}

#[test]
fn seeded_selection_is_reproducible_across_instances() {
    let a = SeededSelection::new(99);
    let b = SeededSelection::new(99);

    let picks_a: Vec<usize> = (0..10).map(|_| a.pick(7)).collect();
    let picks_b: Vec<usize> = (0..10).map(|_| b.pick(7)).collect();

    assert_eq!(picks_a, picks_b);
    assert!(picks_a.iter().all(|index| *index < 7));
}
