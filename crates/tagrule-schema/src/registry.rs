//! # Schema Registry
//!
//! Loads every record schema in a directory once and validates documents
//! against them by name.
//!
//! Files named `*.schema.yaml`, `*.schema.yml` or `*.schema.json` are
//! loaded. A schema is registered under its `name` key, or under the file
//! name with the `.schema.*` suffix removed when `name` is absent.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::document::{load_document, DocumentError};
use crate::schema::{RecordSchema, SchemaError};

const SCHEMA_SUFFIXES: [&str; 3] = [".schema.yaml", ".schema.yml", ".schema.json"];

/// A set of named record schemas.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    /// Directory the schemas were loaded from, if any.
    schema_dir: Option<PathBuf>,
    /// Map from schema name to schema.
    schemas: BTreeMap<String, RecordSchema>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every schema file in `schema_dir`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Load` if the directory or any schema file
    /// cannot be read or parsed, and `SchemaError::DuplicateSchema` if two
    /// files resolve to the same name.
    pub fn load_dir(schema_dir: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let schema_dir = schema_dir.as_ref().to_path_buf();
        let mut registry = Self {
            schema_dir: Some(schema_dir.clone()),
            schemas: BTreeMap::new(),
        };

        let entries = std::fs::read_dir(&schema_dir).map_err(|e| SchemaError::Load {
            path: schema_dir.display().to_string(),
            reason: format!("cannot read schema directory: {e}"),
        })?;

        for entry in entries {
            let path = entry?.path();
            let Some(stem) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(schema_stem)
            else {
                continue;
            };
            let stem = stem.to_string();
            let schema = RecordSchema::load(&path)?;
            let name = schema.name.clone().unwrap_or(stem);
            registry.insert(name, schema)?;
        }

        tracing::debug!(
            dir = %schema_dir.display(),
            schemas = registry.len(),
            "record schemas loaded"
        );
        Ok(registry)
    }

    /// Register `schema` under `name`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::DuplicateSchema` if `name` is already taken.
    pub fn insert(&mut self, name: impl Into<String>, schema: RecordSchema) -> Result<(), SchemaError> {
        let name = name.into();
        if self.schemas.contains_key(&name) {
            return Err(SchemaError::DuplicateSchema { name });
        }
        self.schemas.insert(name, schema);
        Ok(())
    }

    /// Returns the schema directory path, if loaded from one.
    pub fn schema_dir(&self) -> Option<&Path> {
        self.schema_dir.as_deref()
    }

    /// Returns the number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true if no schema is registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Returns the registered names, sorted alphabetically.
    pub fn names(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }

    /// Look up a schema by name.
    pub fn get(&self, name: &str) -> Option<&RecordSchema> {
        self.schemas.get(name)
    }

    fn require(&self, name: &str) -> Result<&RecordSchema, SchemaError> {
        self.get(name).ok_or_else(|| SchemaError::NotFound {
            name: name.to_string(),
        })
    }

    /// Validate an in-memory document against the named schema.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Schema` for an unknown schema name and
    /// `DocumentError::Invalid` with the violations otherwise.
    pub fn validate_document(&self, schema_name: &str, document: &Value) -> Result<(), DocumentError> {
        self.require(schema_name)?
            .validate_document(document)
            .map_err(DocumentError::Invalid)
    }

    /// Load a JSON/YAML document and validate it against the named schema.
    ///
    /// # Errors
    ///
    /// As [`SchemaRegistry::validate_document`], plus `DocumentError::Load`
    /// when the document cannot be read.
    pub fn validate_file(&self, schema_name: &str, document_path: &Path) -> Result<(), DocumentError> {
        let schema = self.require(schema_name)?;
        let document = load_document(document_path)?;
        schema.validate_document(&document).map_err(DocumentError::Invalid)
    }
}

/// Strip a recognised schema suffix from a file name.
fn schema_stem(file_name: &str) -> Option<&str> {
    SCHEMA_SUFFIXES
        .iter()
        .find_map(|suffix| file_name.strip_suffix(suffix))
        .filter(|stem| !stem.is_empty())
}
