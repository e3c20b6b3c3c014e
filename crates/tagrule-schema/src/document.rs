//! # Schema-Bound Documents
//!
//! [`SchemaRecord`] pairs a [`RecordSchema`] with a JSON document and
//! implements [`Record`] for it, so dynamically typed data goes through the
//! same parser and evaluator as a hand-written struct.
//!
//! ## Mapping
//!
//! - A document that is not a JSON object is not record-shaped.
//! - Fields are visited in schema order; document keys the schema does not
//!   declare are ignored.
//! - An absent or `null` value stands for the kind's zero value (`0`, `""`,
//!   an empty list), which is then validated like any other value.
//! - A value of the wrong JSON type is reported as a kind mismatch.

use std::borrow::Cow;
use std::path::Path;

use serde_json::Value;
use tagrule_core::{Field, FieldKind, FieldValue, Record, Violations, Visibility};
use thiserror::Error;

use crate::schema::{is_yaml, FieldSchema, RecordSchema, SchemaError};

/// Error validating a document file.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document file could not be loaded or parsed.
    #[error("document load error for '{path}': {reason}")]
    Load {
        /// Path to the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// The schema to validate against could not be resolved.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The document did not satisfy its schema.
    #[error("validation failed:\n{0}")]
    Invalid(Violations),
}

impl DocumentError {
    /// The violations, if the document was loaded but failed validation.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::Invalid(v) => Some(v),
            _ => None,
        }
    }
}

/// A JSON document viewed through a [`RecordSchema`].
#[derive(Debug, Clone, Copy)]
pub struct SchemaRecord<'s, 'v> {
    schema: &'s RecordSchema,
    document: &'v Value,
}

impl<'s, 'v> SchemaRecord<'s, 'v> {
    /// Bind `document` to `schema`.
    pub fn new(schema: &'s RecordSchema, document: &'v Value) -> Self {
        Self { schema, document }
    }
}

impl Record for SchemaRecord<'_, '_> {
    fn fields(&self) -> Option<Vec<Field<'_>>> {
        let object = self.document.as_object()?;
        let fields = self
            .schema
            .fields
            .iter()
            .map(|decl| {
                let value = field_value(decl, object.get(&decl.name));
                Field {
                    name: Cow::Borrowed(decl.name.as_str()),
                    tag: decl.validate.as_deref(),
                    visibility: if decl.exported {
                        Visibility::Public
                    } else {
                        Visibility::Private
                    },
                    value,
                }
            })
            .collect();
        Some(fields)
    }
}

fn field_value<'a>(decl: &'a FieldSchema, value: Option<&'a Value>) -> FieldValue<'a> {
    let Ok(kind) = decl.kind.parse::<FieldKind>() else {
        return FieldValue::unsupported(decl.kind.as_str());
    };

    let value = match value {
        None | Some(Value::Null) => {
            tracing::trace!(field = %decl.name, %kind, "field absent, using zero value");
            return zero_value(kind);
        }
        Some(value) => value,
    };

    let mismatch = |found| FieldValue::Mismatched {
        expected: kind,
        found,
    };

    match kind {
        FieldKind::Integer => value
            .as_i64()
            .map_or_else(|| mismatch(json_type(value)), FieldValue::Integer),
        FieldKind::String => value
            .as_str()
            .map_or_else(|| mismatch(json_type(value)), FieldValue::String),
        FieldKind::IntegerList => match value.as_array() {
            Some(items) => items
                .iter()
                .map(Value::as_i64)
                .collect::<Option<Vec<i64>>>()
                .map_or_else(
                    || mismatch("array with a non-integer element"),
                    |items| FieldValue::IntegerList(Cow::Owned(items)),
                ),
            None => mismatch(json_type(value)),
        },
        FieldKind::StringList => match value.as_array() {
            Some(items) => items
                .iter()
                .map(Value::as_str)
                .collect::<Option<Vec<&str>>>()
                .map_or_else(
                    || mismatch("array with a non-string element"),
                    FieldValue::StringList,
                ),
            None => mismatch(json_type(value)),
        },
    }
}

fn zero_value(kind: FieldKind) -> FieldValue<'static> {
    match kind {
        FieldKind::Integer => FieldValue::Integer(0),
        FieldKind::String => FieldValue::String(""),
        FieldKind::IntegerList => FieldValue::IntegerList(Cow::Owned(Vec::new())),
        FieldKind::StringList => FieldValue::StringList(Vec::new()),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(n) if n.is_i64() => "integer",
        Value::Number(_) => "out-of-range integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Read a document file as JSON, or as YAML for `.yaml`/`.yml` paths.
pub(crate) fn load_document(path: &Path) -> Result<Value, DocumentError> {
    let load_error = |reason: String| {
        tracing::warn!(path = %path.display(), %reason, "document could not be loaded");
        DocumentError::Load {
            path: path.display().to_string(),
            reason,
        }
    };

    let content = std::fs::read_to_string(path)
        .map_err(|e| load_error(format!("cannot read file: {e}")))?;

    if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|e| load_error(format!("invalid YAML: {e}")))
    } else {
        serde_json::from_str(&content).map_err(|e| load_error(format!("invalid JSON: {e}")))
    }
}
