//! Rule composition: union semantics, idempotence, order insensitivity.

mod common;

use common::{eq, fixtures, frame};
use proptest::prelude::*;
use semblance_core::RuleSet;

#[test]
fn test_merge_equals_chained_construction() {
    let fx = fixtures();
    let merged = RuleSet::new()
        .ignore_unknown()
        .merge(RuleSet::new().ignore_empty_messages())
        .merge(RuleSet::new().ignore_fields(&fx.frame, &["count"]).unwrap());
    let chained = RuleSet::new()
        .ignore_unknown()
        .ignore_empty_messages()
        .ignore_fields(&fx.frame, &["count"])
        .unwrap();
    assert_eq!(merged, chained);
}

#[test]
fn test_applying_a_relaxation_twice_changes_nothing() {
    let fx = fixtures();
    let once = RuleSet::new()
        .ignore_default_scalars()
        .ignore_enums(&[fx.mode.clone()]);
    let twice = once
        .clone()
        .ignore_default_scalars()
        .ignore_enums(&[fx.mode.clone()]);
    assert_eq!(once, twice);

    let x = frame(&fx).with_field("bias", 81i32.into()).unwrap();
    let y = frame(&fx);
    assert_eq!(eq(&x, &y, &once), eq(&x, &y, &twice));
    assert!(eq(&x, &y, &once));
}

#[test]
fn test_merge_is_commutative() {
    let fx = fixtures();
    let a = RuleSet::new()
        .ignore_unknown()
        .ignore_messages(&[fx.probe.clone()]);
    let b = RuleSet::new()
        .ignore_empty_messages()
        .ignore_fields(&fx.frame, &["label"])
        .unwrap();
    assert_eq!(a.clone().merge(b.clone()), b.merge(a));
}

#[test]
fn test_irrelevant_relaxation_never_changes_the_verdict() {
    let fx = fixtures();
    let x = frame(&fx).with_field("count", 5i32.into()).unwrap();
    let y = frame(&fx).with_field("count", 6i32.into()).unwrap();
    let irrelevant = RuleSet::new()
        .ignore_enums(&[fx.grade.clone()])
        .ignore_messages(&[fx.gauge.clone()]);
    assert!(!eq(&x, &y, &RuleSet::new()));
    assert!(!eq(&x, &y, &irrelevant));

    let same_x = frame(&fx).with_field("count", 5i32.into()).unwrap();
    assert!(eq(&x, &same_x, &irrelevant));
}

proptest! {
    /// Applying any relaxation set twice yields the same verdict as once.
    #[test]
    fn prop_rule_sets_are_idempotent(
        count_x in 0i32..4,
        count_y in 0i32..4,
        label in "[a-c]{0,2}",
        unknown in proptest::bool::ANY,
        with_ignore_unknown in proptest::bool::ANY,
        with_ignore_defaults in proptest::bool::ANY,
        with_ignore_empty in proptest::bool::ANY,
    ) {
        let fx = fixtures();
        let mut x = frame(&fx)
            .with_field("count", count_x.into()).unwrap()
            .with_field("label", label.as_str().into()).unwrap();
        if unknown {
            x = x.with_unknown(vec![0x08, 0x01]);
        }
        let y = frame(&fx).with_field("count", count_y.into()).unwrap();

        let mut rules = RuleSet::new();
        if with_ignore_unknown {
            rules = rules.ignore_unknown();
        }
        if with_ignore_defaults {
            rules = rules.ignore_default_scalars();
        }
        if with_ignore_empty {
            rules = rules.ignore_empty_messages();
        }
        let doubled = rules.clone().merge(rules.clone());
        prop_assert_eq!(eq(&x, &y, &rules), eq(&x, &y, &doubled));
    }
}
