//! # Record Schemas
//!
//! A [`RecordSchema`] declares the fields of a record the way a struct
//! definition would: name, declared type, optional validation tag, and
//! visibility. Schemas are plain data, written in YAML or JSON:
//!
//! ```yaml
//! name: account
//! fields:
//!   - name: Age
//!     kind: int
//!     validate: "range:18,50"
//!   - name: Role
//!     kind: string
//!     validate: "in:admin,stuff"
//!   - name: internal
//!     kind: string
//!     exported: false
//! ```
//!
//! `kind` is kept as written. An unknown type name is not a load error; it
//! surfaces as an `invalid validator syntax` violation on any tagged field
//! of that type when a document is validated.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tagrule_core::{validate, Violations};
use thiserror::Error;

use crate::document::{load_document, DocumentError, SchemaRecord};

/// Error while loading or looking up a schema.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema file could not be read or parsed.
    #[error("schema load error for '{path}': {reason}")]
    Load {
        /// Path to the schema file.
        path: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The schema text is not a valid record schema.
    #[error("invalid schema: {reason}")]
    Parse {
        /// Deserializer message.
        reason: String,
    },

    /// Two fields share a name.
    #[error("duplicate field '{name}' in schema")]
    DuplicateField {
        /// The repeated field name.
        name: String,
    },

    /// Two schemas in one registry share a name.
    #[error("duplicate schema '{name}'")]
    DuplicateSchema {
        /// The repeated schema name.
        name: String,
    },

    /// No schema is registered under the requested name.
    #[error("schema not found: '{name}'")]
    NotFound {
        /// Requested schema name.
        name: String,
    },

    /// IO error reading a schema directory.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// One declared field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSchema {
    /// Field name; also the key looked up in documents.
    pub name: String,
    /// Declared type name (`int`, `string`, `[]int`, `[]string` or the
    /// snake_case kind names).
    pub kind: String,
    /// Validation tag, if the field is validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate: Option<String>,
    /// Whether the field is publicly visible.
    #[serde(default = "default_exported")]
    pub exported: bool,
}

fn default_exported() -> bool {
    true
}

/// Declared shape of a record: its fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordSchema {
    /// Schema name, used as the registry key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Fields in declaration order.
    pub fields: Vec<FieldSchema>,
}

impl RecordSchema {
    /// Parse a schema from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Parse` for malformed YAML or an unexpected
    /// shape, and `SchemaError::DuplicateField` for repeated field names.
    pub fn from_yaml_str(text: &str) -> Result<Self, SchemaError> {
        let schema: Self = serde_yaml::from_str(text).map_err(|e| SchemaError::Parse {
            reason: format!("invalid YAML: {e}"),
        })?;
        schema.checked()
    }

    /// Parse a schema from JSON text.
    ///
    /// # Errors
    ///
    /// Same as [`RecordSchema::from_yaml_str`].
    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        let schema: Self = serde_json::from_str(text).map_err(|e| SchemaError::Parse {
            reason: format!("invalid JSON: {e}"),
        })?;
        schema.checked()
    }

    /// Load a schema file. `.yaml`/`.yml` files are read as YAML, anything
    /// else as JSON.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Load` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::Load {
            path: path.display().to_string(),
            reason: format!("cannot read file: {e}"),
        })?;

        let parsed = if is_yaml(path) {
            Self::from_yaml_str(&content)
        } else {
            Self::from_json_str(&content)
        };

        parsed.map_err(|e| SchemaError::Load {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Look up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Present `document` as a [`tagrule_core::Record`] shaped by this schema.
    pub fn bind<'s, 'v>(&'s self, document: &'v Value) -> SchemaRecord<'s, 'v> {
        SchemaRecord::new(self, document)
    }

    /// Validate an in-memory JSON document.
    ///
    /// # Errors
    ///
    /// Returns the ordered violations when any tagged field fails, or a
    /// single `NotRecord` violation when `document` is not a JSON object.
    pub fn validate_document(&self, document: &Value) -> Result<(), Violations> {
        validate(&self.bind(document))
    }

    /// Load a JSON or YAML document from disk and validate it.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Load` if the file cannot be read or parsed,
    /// and `DocumentError::Invalid` with the violations otherwise.
    pub fn validate_file(&self, path: &Path) -> Result<(), DocumentError> {
        let document = load_document(path)?;
        self.validate_document(&document)
            .map_err(DocumentError::Invalid)
    }

    fn checked(self) -> Result<Self, SchemaError> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    name: field.name.clone(),
                });
            }
        }
        Ok(self)
    }
}

pub(crate) fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    )
}
