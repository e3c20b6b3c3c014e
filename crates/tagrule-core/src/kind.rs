//! # Field and Constraint Kinds
//!
//! The two closed enumerations the engine dispatches on: the declared shape
//! of a field ([`FieldKind`]) and the rule family of a tag
//! ([`ConstraintKind`]). Every `match` on either is exhaustive, so adding a
//! variant forces the parser and the evaluator to handle it.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::UnsupportedKind;

/// Declared shape of a record field.
///
/// | Kind | Canonical name | Short type name |
/// |------|----------------|-----------------|
/// | Integer | `integer` | `int` |
/// | String | `string` | `string` |
/// | IntegerList | `integer_list` | `[]int` |
/// | StringList | `string_list` | `[]string` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// A single signed integer.
    Integer,
    /// A single string.
    String,
    /// An ordered list of signed integers.
    IntegerList,
    /// An ordered list of strings.
    StringList,
}

impl FieldKind {
    /// Returns all four field kinds.
    pub fn all_kinds() -> &'static [FieldKind] {
        &[
            Self::Integer,
            Self::String,
            Self::IntegerList,
            Self::StringList,
        ]
    }

    /// Returns the snake_case identifier, matching the serde format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::String => "string",
            Self::IntegerList => "integer_list",
            Self::StringList => "string_list",
        }
    }

    /// True for kinds whose scalar domain is integers.
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Integer | Self::IntegerList)
    }

    /// True for kinds whose scalar domain is strings.
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String | Self::StringList)
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = UnsupportedKind;

    /// Parse a declared type name. Accepts both the canonical snake_case
    /// names and the short type names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "integer" | "int" => Ok(Self::Integer),
            "string" => Ok(Self::String),
            "integer_list" | "[]int" => Ok(Self::IntegerList),
            "string_list" | "[]string" => Ok(Self::StringList),
            other => Err(UnsupportedKind(other.to_string())),
        }
    }
}

/// Rule family of a validation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// `len:N` — exact string length.
    Length,
    /// `in:a,b,c` — membership in a fixed list.
    MembershipList,
    /// `min:N` — lower bound.
    Minimum,
    /// `max:N` — upper bound.
    Maximum,
    /// `range:A,B` — inclusive lower and upper bound.
    Range,
}

impl ConstraintKind {
    /// Returns all constraint kinds in prefix-matching order.
    pub fn all_kinds() -> &'static [ConstraintKind] {
        &[
            Self::Length,
            Self::MembershipList,
            Self::Minimum,
            Self::Maximum,
            Self::Range,
        ]
    }

    /// The tag prefix that selects this rule family, including the colon.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Length => "len:",
            Self::MembershipList => "in:",
            Self::Minimum => "min:",
            Self::Maximum => "max:",
            Self::Range => "range:",
        }
    }

    /// Whether a tag of this family may be attached to a field of `kind`.
    pub fn applies_to(&self, kind: FieldKind) -> bool {
        match self {
            Self::Length => kind.is_string(),
            Self::MembershipList | Self::Minimum | Self::Maximum | Self::Range => true,
        }
    }
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix().trim_end_matches(':'))
    }
}
