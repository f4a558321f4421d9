use super::common::*;
use crate::workflows::slides::matching::filter::{capacity_sufficient, filter_candidates};

#[test]
fn over_capacity_templates_are_vetoed() {
    let pool = vec![template("small", 2), template("fits", 4), template("big", 6)];
    let four_items = content(4);

    let survivors = filter_candidates(&four_items, &pool);

    let ids: Vec<&str> = survivors
        .iter()
        .map(|template| template.id.0.as_str())
        .collect();
    assert_eq!(ids, vec!["fits", "big"]);
}

#[test]
fn exact_capacity_survives_the_filter() {
    assert!(capacity_sufficient(&content(3), &template("t", 3)));
    assert!(!capacity_sufficient(&content(4), &template("t", 3)));
}

#[test]
fn survivors_keep_pool_order() {
    let pool = vec![
        template("c", 5),
        template("a", 5),
        template("b", 5),
    ];

    let survivors = filter_candidates(&content(3), &pool);

    let ids: Vec<&str> = survivors
        .iter()
        .map(|template| template.id.0.as_str())
        .collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
}

#[test]
fn empty_content_never_trips_the_veto() {
    let pool = vec![template("t", 1)];
    assert_eq!(filter_candidates(&content(0), &pool).len(), 1);
}
