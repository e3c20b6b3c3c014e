//! # Validation Orchestrator
//!
//! Walks a [`Record`]'s fields, parses each validation tag against the
//! field's declared kind, and evaluates scalars once and lists once per
//! element. The violation collection lives on this call's stack and is
//! handed to the parser/evaluator explicitly, so concurrent calls never see
//! each other's results.

use crate::constraint::parse;
use crate::error::{ValidationError, Violation, Violations};
use crate::evaluate::{evaluate_integer, evaluate_string};
use crate::record::{Field, FieldValue, Record};

/// Validate every tagged field of `record`.
///
/// # Errors
///
/// Returns the full, ordered [`Violations`] when any field fails. A value
/// that is not record-shaped yields exactly one
/// [`ValidationError::NotRecord`] violation.
pub fn validate<R: Record + ?Sized>(record: &R) -> Result<(), Violations> {
    let mut violations = Violations::new();

    match record.fields() {
        None => {
            tracing::debug!("validate called on a value that is not record-shaped");
            violations.push(Violation::not_record());
        }
        Some(fields) => {
            let tagged = fields.iter().filter(|f| f.tag.is_some()).count();
            for field in &fields {
                check_field(field, &mut violations);
            }
            tracing::debug!(
                fields = fields.len(),
                tagged,
                violations = violations.len(),
                "record validated"
            );
        }
    }

    violations.into_result()
}

fn check_field(field: &Field<'_>, violations: &mut Violations) {
    let Some(tag) = field.tag else {
        return;
    };
    let name = field.name.as_ref();

    if !field.is_public() {
        violations.push(Violation::new(name, ValidationError::UnexportedField));
        return;
    }

    let kind = match &field.value {
        FieldValue::Unsupported { type_name } => {
            tracing::debug!(field = name, %type_name, "tag on field of unsupported type");
            violations.push(Violation::new(name, ValidationError::InvalidSyntax));
            return;
        }
        FieldValue::Mismatched { expected, .. } => *expected,
        value => match value.kind() {
            Some(kind) => kind,
            None => return,
        },
    };

    let descriptor = match parse(tag, kind) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            tracing::debug!(field = name, tag, %kind, "invalid validation tag");
            violations.push(Violation::new(name, e.into()));
            return;
        }
    };

    match &field.value {
        FieldValue::Integer(v) => evaluate_integer(&descriptor, *v, name, violations),
        FieldValue::String(s) => evaluate_string(&descriptor, s, name, violations),
        FieldValue::IntegerList(items) => {
            for v in items.iter() {
                evaluate_integer(&descriptor, *v, name, violations);
            }
        }
        FieldValue::StringList(items) => {
            for s in items {
                evaluate_string(&descriptor, s, name, violations);
            }
        }
        FieldValue::Mismatched { expected, found } => violations.push(Violation::new(
            name,
            ValidationError::KindMismatch {
                field: name.to_string(),
                expected: *expected,
                found: (*found).to_string(),
            },
        )),
        FieldValue::Unsupported { .. } => {}
    }
}
