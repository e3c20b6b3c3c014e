//! # tagrule-schema — Declarative Record Schemas
//!
//! Lets JSON or YAML documents, which have no Rust struct behind them, be
//! validated with the `tagrule-core` engine. A [`RecordSchema`] declares
//! field names, declared types, validation tags and visibility; binding a
//! document to it yields a [`SchemaRecord`] that implements
//! [`tagrule_core::Record`].
//!
//! ## Modules
//!
//! - [`schema`] — schema data model and YAML/JSON loading.
//! - [`document`] — the document-to-record adapter and document loading.
//! - [`registry`] — a directory of named schemas, validated against by name.
//!
//! ## Crate Policy
//!
//! - Depends only on `tagrule-core` internally.
//! - Schema load problems are `SchemaError`s; problems with a document's
//!   content are always violations, never load errors.

pub mod document;
pub mod registry;
pub mod schema;

pub use document::{DocumentError, SchemaRecord};
pub use registry::SchemaRegistry;
pub use schema::{FieldSchema, RecordSchema, SchemaError};
