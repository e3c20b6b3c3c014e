//! # Error Types — Violation Taxonomy
//!
//! Every problem a validation call detects becomes exactly one
//! [`Violation`] carrying a [`ValidationError`]. The four sentinel-style
//! variants (`NotRecord`, `UnexportedField`, `InvalidSyntax`,
//! `KindMismatch`) describe problems with the record or its tags; the
//! `Constraint` variant describes a value that failed its rule.
//!
//! ## Design
//!
//! - Structural errors short-circuit the call with a single violation.
//! - Visibility, syntax and constraint errors are recorded per field (or per
//!   collection element) and inspection continues.
//! - Nothing is retried and nothing is dropped.

use std::fmt;

use thiserror::Error;

use crate::kind::FieldKind;

/// A tag did not match the constraint grammar.
///
/// The grammar does not distinguish sub-causes: an unknown prefix, a
/// malformed integer and a missing argument all produce this one error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid validator syntax")]
pub struct SyntaxError;

/// A declared type name is not one of the four supported field kinds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported field kind: {0:?}")]
pub struct UnsupportedKind(pub String);

/// The specific rule a value failed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFailure {
    /// Integer not found in an `in:` list.
    #[error("the number is not in the list")]
    NumberNotInList,
    /// Integer below a `min:` bound.
    #[error("the number is less than the lower bound")]
    NumberBelowMinimum,
    /// Integer above a `max:` bound.
    #[error("the number is greater than the upper bound")]
    NumberAboveMaximum,
    /// Integer outside a `range:` interval.
    #[error("the number is not in range")]
    NumberOutOfRange,
    /// String not contained in any `in:` entry.
    #[error("the string is not in the list")]
    StringNotInList,
    /// String length differs from a `len:` value.
    #[error("incorrect string len")]
    StringLengthMismatch,
    /// String length below a `min:` bound.
    #[error("string len is less than the lower bound")]
    StringLengthBelowMinimum,
    /// String length above a `max:` bound.
    #[error("string len is greater than the upper bound")]
    StringLengthAboveMaximum,
    /// String length outside a `range:` interval.
    #[error("string len is not in range")]
    StringLengthOutOfRange,
}

/// A single problem found while validating a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The value handed to `validate` is not record-shaped.
    #[error("wrong argument given, should be a struct")]
    NotRecord,

    /// A tagged field is not publicly visible.
    #[error("validation for unexported field is not allowed")]
    UnexportedField,

    /// A tag failed to parse, or was attached to a field of unsupported type.
    #[error("invalid validator syntax")]
    InvalidSyntax,

    /// A field value failed its rule.
    #[error("wrong field {field}: {rule}")]
    Constraint {
        /// Name of the failing field.
        field: String,
        /// The rule that failed.
        rule: RuleFailure,
    },

    /// A document value does not have the declared field kind.
    #[error("wrong field {field}: expected {expected}, found {found}")]
    KindMismatch {
        /// Name of the field.
        field: String,
        /// Declared kind.
        expected: FieldKind,
        /// Short description of the actual value.
        found: String,
    },
}

impl From<SyntaxError> for ValidationError {
    fn from(_: SyntaxError) -> Self {
        Self::InvalidSyntax
    }
}

/// One recorded violation, tied to the field it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Name of the field. Empty when the violation concerns the record itself.
    pub field: String,
    /// What went wrong.
    pub error: ValidationError,
}

impl Violation {
    /// Create a violation for `field`.
    pub fn new(field: impl Into<String>, error: ValidationError) -> Self {
        Self {
            field: field.into(),
            error,
        }
    }

    /// Create the structural violation for a non-record input.
    pub fn not_record() -> Self {
        Self::new(String::new(), ValidationError::NotRecord)
    }

    /// Create a rule-failure violation for `field`.
    pub fn constraint(field: &str, rule: RuleFailure) -> Self {
        Self::new(
            field,
            ValidationError::Constraint {
                field: field.to_string(),
                rule,
            },
        )
    }

    /// Human-readable message, as it appears in the rendered collection.
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

/// Ordered collection of violations produced by one validation call.
///
/// Insertion order is discovery order. Entries are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Iterate over the violations in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }

    /// Membership test: is `target` among the collected errors?
    ///
    /// Sentinel variants such as [`ValidationError::NotRecord`] compare by
    /// value, so `contains(&ValidationError::NotRecord)` answers whether the
    /// structural error was reported.
    pub fn contains(&self, target: &ValidationError) -> bool {
        self.violations.iter().any(|v| &v.error == target)
    }

    /// Violations recorded against `field`.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations.iter().filter(move |v| v.field == field)
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Violations> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}
