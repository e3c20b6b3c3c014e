//! # Constraint Parser
//!
//! Turns a raw validation tag plus the declared [`FieldKind`] of the field
//! it is attached to into a typed [`ConstraintDescriptor`].
//!
//! ## Grammar
//!
//! ```text
//! tag      := prefix args
//! prefix   := "len:" | "in:" | "min:" | "max:" | "range:"
//! args     := token ("," token)*
//! ```
//!
//! - `len:N` — string kinds only; `N` is a non-negative integer.
//! - `in:a,b,...` — any kind; for integer kinds every token must be an integer.
//! - `min:N`, `max:N` — one integer.
//! - `range:A,B` — two integers; `A > B` is accepted and rejects every value.
//!
//! Tokens beyond the ones a rule consumes are ignored. Every failure is the
//! same [`SyntaxError`].

use std::fmt;

use crate::error::SyntaxError;
use crate::kind::{ConstraintKind, FieldKind};

/// One side of a numeric interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// No limit on this side.
    Unbounded,
    /// Inclusive limit.
    Inclusive(i64),
}

impl Bound {
    /// The limit, if one is set.
    pub fn value(self) -> Option<i64> {
        match self {
            Self::Unbounded => None,
            Self::Inclusive(v) => Some(v),
        }
    }
}

/// Parsed, validated representation of one tag.
///
/// Exactly one rule family is active per descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintDescriptor {
    /// String length must equal `exact`.
    Length {
        /// Required length in bytes.
        exact: usize,
    },
    /// Value must match one of `values`.
    MembershipList {
        /// Allowed entries, verbatim from the tag.
        values: Vec<String>,
    },
    /// Value (or string length) must be at least `lower`.
    Minimum {
        /// Inclusive lower bound.
        lower: i64,
    },
    /// Value (or string length) must be at most `upper`.
    Maximum {
        /// Inclusive upper bound.
        upper: i64,
    },
    /// Value (or string length) must lie in `lower..=upper`.
    Range {
        /// Inclusive lower bound.
        lower: i64,
        /// Inclusive upper bound.
        upper: i64,
    },
}

impl ConstraintDescriptor {
    /// The active rule family.
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Self::Length { .. } => ConstraintKind::Length,
            Self::MembershipList { .. } => ConstraintKind::MembershipList,
            Self::Minimum { .. } => ConstraintKind::Minimum,
            Self::Maximum { .. } => ConstraintKind::Maximum,
            Self::Range { .. } => ConstraintKind::Range,
        }
    }

    /// Lower bound; `Unbounded` unless the rule is `min:` or `range:`.
    pub fn lower_bound(&self) -> Bound {
        match self {
            Self::Minimum { lower } | Self::Range { lower, .. } => Bound::Inclusive(*lower),
            _ => Bound::Unbounded,
        }
    }

    /// Upper bound; `Unbounded` unless the rule is `max:` or `range:`.
    pub fn upper_bound(&self) -> Bound {
        match self {
            Self::Maximum { upper } | Self::Range { upper, .. } => Bound::Inclusive(*upper),
            _ => Bound::Unbounded,
        }
    }

    /// Allowed entries of an `in:` rule; empty for every other rule.
    pub fn membership_values(&self) -> &[String] {
        match self {
            Self::MembershipList { values } => values,
            _ => &[],
        }
    }

    /// Required length of a `len:` rule.
    pub fn exact_length(&self) -> Option<usize> {
        match self {
            Self::Length { exact } => Some(*exact),
            _ => None,
        }
    }
}

impl fmt::Display for ConstraintDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().prefix())?;
        match self {
            Self::Length { exact } => write!(f, "{exact}"),
            Self::MembershipList { values } => f.write_str(&values.join(",")),
            Self::Minimum { lower } => write!(f, "{lower}"),
            Self::Maximum { upper } => write!(f, "{upper}"),
            Self::Range { lower, upper } => write!(f, "{lower},{upper}"),
        }
    }
}

/// Parse a validation tag for a field of the given kind.
///
/// # Errors
///
/// Returns [`SyntaxError`] when the prefix is unknown, the rule does not
/// apply to `kind`, the first argument is empty, an integer argument is
/// malformed, or `range:` has fewer than two arguments.
pub fn parse(tag: &str, kind: FieldKind) -> Result<ConstraintDescriptor, SyntaxError> {
    let (rule, rest) = ConstraintKind::all_kinds()
        .iter()
        .find_map(|rule| tag.strip_prefix(rule.prefix()).map(|rest| (*rule, rest)))
        .ok_or(SyntaxError)?;

    if !rule.applies_to(kind) {
        return Err(SyntaxError);
    }

    let tokens: Vec<&str> = rest.split(',').collect();
    let first = match tokens.first() {
        Some(token) if !token.is_empty() => *token,
        _ => return Err(SyntaxError),
    };

    match rule {
        ConstraintKind::Length => {
            let exact = first.parse::<usize>().map_err(|_| SyntaxError)?;
            Ok(ConstraintDescriptor::Length { exact })
        }
        ConstraintKind::MembershipList => {
            if kind.is_integer() {
                for token in &tokens {
                    parse_int(token)?;
                }
            }
            Ok(ConstraintDescriptor::MembershipList {
                values: tokens.iter().map(|t| (*t).to_string()).collect(),
            })
        }
        ConstraintKind::Minimum => Ok(ConstraintDescriptor::Minimum {
            lower: parse_int(first)?,
        }),
        ConstraintKind::Maximum => Ok(ConstraintDescriptor::Maximum {
            upper: parse_int(first)?,
        }),
        ConstraintKind::Range => {
            let second = tokens.get(1).ok_or(SyntaxError)?;
            Ok(ConstraintDescriptor::Range {
                lower: parse_int(first)?,
                upper: parse_int(second)?,
            })
        }
    }
}

fn parse_int(token: &str) -> Result<i64, SyntaxError> {
    token.parse::<i64>().map_err(|_| SyntaxError)
}
