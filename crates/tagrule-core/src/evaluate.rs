//! # Constraint Evaluator
//!
//! Applies a parsed [`ConstraintDescriptor`] to one scalar value and records
//! at most one [`Violation`] in the caller's [`Violations`]. List fields are
//! evaluated by calling these functions once per element.
//!
//! String membership is substring containment: a value passes an `in:` rule
//! when some allowed entry *contains* it, not only when one equals it.
//! String lengths are measured in UTF-8 bytes.

use crate::constraint::ConstraintDescriptor;
use crate::error::{RuleFailure, Violation, Violations};

/// Check an integer value against `descriptor`.
///
/// A `Length` descriptor never reaches here for a well-formed call; the
/// parser rejects `len:` on integer kinds. It is ignored if it does.
pub fn evaluate_integer(
    descriptor: &ConstraintDescriptor,
    value: i64,
    field: &str,
    violations: &mut Violations,
) {
    let failure = match descriptor {
        ConstraintDescriptor::MembershipList { values } => {
            let found = values
                .iter()
                .any(|entry| entry.parse::<i64>().is_ok_and(|n| n == value));
            (!found).then_some(RuleFailure::NumberNotInList)
        }
        ConstraintDescriptor::Minimum { lower } => {
            (value < *lower).then_some(RuleFailure::NumberBelowMinimum)
        }
        ConstraintDescriptor::Maximum { upper } => {
            (value > *upper).then_some(RuleFailure::NumberAboveMaximum)
        }
        ConstraintDescriptor::Range { lower, upper } => {
            (value < *lower || value > *upper).then_some(RuleFailure::NumberOutOfRange)
        }
        ConstraintDescriptor::Length { .. } => None,
    };
    record(descriptor, field, failure, violations);
}

/// Check a string value against `descriptor`.
pub fn evaluate_string(
    descriptor: &ConstraintDescriptor,
    value: &str,
    field: &str,
    violations: &mut Violations,
) {
    // Lengths beyond i64::MAX cannot be built in memory; saturate anyway.
    let len = i64::try_from(value.len()).unwrap_or(i64::MAX);
    let failure = match descriptor {
        ConstraintDescriptor::MembershipList { values } => {
            let found = values.iter().any(|entry| entry.contains(value));
            (!found).then_some(RuleFailure::StringNotInList)
        }
        ConstraintDescriptor::Length { exact } => {
            (value.len() != *exact).then_some(RuleFailure::StringLengthMismatch)
        }
        ConstraintDescriptor::Minimum { lower } => {
            (len < *lower).then_some(RuleFailure::StringLengthBelowMinimum)
        }
        ConstraintDescriptor::Maximum { upper } => {
            (len > *upper).then_some(RuleFailure::StringLengthAboveMaximum)
        }
        ConstraintDescriptor::Range { lower, upper } => {
            (len < *lower || len > *upper).then_some(RuleFailure::StringLengthOutOfRange)
        }
    };
    record(descriptor, field, failure, violations);
}

fn record(
    descriptor: &ConstraintDescriptor,
    field: &str,
    failure: Option<RuleFailure>,
    violations: &mut Violations,
) {
    match failure {
        Some(rule) => {
            tracing::trace!(field, constraint = %descriptor, %rule, "constraint violated");
            violations.push(Violation::constraint(field, rule));
        }
        None => tracing::trace!(field, constraint = %descriptor, "constraint satisfied"),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::constraint::parse;
    use crate::kind::FieldKind;
    use proptest::prelude::*;

    fn violates(tag: &str, value: i64) -> bool {
        let d = parse(tag, FieldKind::Integer).unwrap();
        let mut violations = Violations::new();
        evaluate_integer(&d, value, "N", &mut violations);
        !violations.is_empty()
    }

    proptest! {
        /// For an ordered range, a value violates iff it lies outside it.
        #[test]
        fn ordered_range_matches_interval(a in any::<i64>(), b in any::<i64>(), v in any::<i64>()) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let tag = format!("range:{lo},{hi}");
            prop_assert_eq!(violates(&tag, v), v < lo || v > hi);
        }

        /// An inverted range rejects every value.
        #[test]
        fn inverted_range_rejects_everything(
            (lo, hi) in (any::<i64>(), any::<i64>()).prop_filter("inverted", |(a, b)| a > b),
            v in any::<i64>(),
        ) {
            let tag = format!("range:{lo},{hi}");
            prop_assert!(violates(&tag, v));
        }

        /// At most one violation per evaluation call.
        #[test]
        fn at_most_one_violation_per_call(s in "[a-z]{0,12}", n in 0i64..10) {
            for tag in [format!("len:{n}"), format!("min:{n}"), format!("max:{n}"), format!("range:{n},{}", n + 2), "in:abc,xyz".to_string()] {
                let d = parse(&tag, FieldKind::String).unwrap();
                let mut violations = Violations::new();
                evaluate_string(&d, &s, "S", &mut violations);
                prop_assert!(violations.len() <= 1);
            }
        }
    }
}
