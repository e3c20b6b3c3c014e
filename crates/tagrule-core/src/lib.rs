//! # tagrule-core — Tag-Driven Field Validation
//!
//! Validates the fields of an in-memory record against declarative
//! constraints attached to each field as a short tag string
//! (`range:1,10`, `in:red,green`, `len:8`).
//!
//! ## Pipeline
//!
//! 1. A type implements [`Record`], listing its fields with their tags.
//! 2. [`validate`] parses each tag against the field's [`FieldKind`]
//!    ([`parse`] → [`ConstraintDescriptor`]).
//! 3. The descriptor is applied to the value ([`evaluate_integer`],
//!    [`evaluate_string`]), once per element for list fields.
//! 4. Every problem becomes one [`Violation`]; the call returns `Ok(())` or
//!    the ordered [`Violations`].
//!
//! ## Crate Policy
//!
//! - No global state: each call owns its violation collection.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Logging goes through `tracing`; installing a subscriber is the
//!   caller's job.

pub mod constraint;
pub mod error;
pub mod evaluate;
pub mod kind;
pub mod record;
pub mod validate;

// Re-export primary types for ergonomic imports.
pub use constraint::{parse, Bound, ConstraintDescriptor};
pub use error::{RuleFailure, SyntaxError, UnsupportedKind, ValidationError, Violation, Violations};
pub use evaluate::{evaluate_integer, evaluate_string};
pub use kind::{ConstraintKind, FieldKind};
pub use record::{Field, FieldValue, Record, Visibility};
pub use validate::validate;
