//! Typed hydration of delimiter-separated records.
//!
//! This crate turns flat tabular text (a header line followed by data lines)
//! into strongly-typed domain objects by matching header columns to fields and
//! parsing each value into the field's type.
//!
//! # Features
//!
//! - **Schema Resolution**: Per-type field tables with column aliases ([`TypeSchema`])
//! - **Value Coercion**: Built-in parsers for text, numbers, booleans and dates ([`Coerce`])
//! - **Row Binding**: Empty values keep defaults, unknown columns are ignored ([`RecordBinder`])
//! - **Orchestration**: Header detection, ordered output, fail-fast errors ([`Hydrator`])
//! - **Configured Records**: Field tables loaded from TOML ([`RecordSpec`])
//!
//! # Example
//!
//! ```ignore
//! use hydrate_core::{Hydrator, hydratable};
//!
//! #[derive(Debug, Default)]
//! struct Simple {
//!     field0: i32,
//!     field1: Option<String>,
//!     field2: f64,
//! }
//!
//! hydratable! {
//!     Simple {
//!         field0: i32,
//!         field1: Option<String>,
//!         field2: f64,
//!     }
//! }
//!
//! let records = Hydrator::<Simple>::builder()
//!     .delimiter("\t")
//!     .build()?
//!     .hydrate_all("data.tsv")?;
//! ```

mod binder;
mod cache;
mod coerce;
mod dynamic;
mod error;
mod field;
mod hydrator;
mod macros;
mod options;
mod record;
mod schema;
mod source;

// === Error Types ===
pub use error::{HydrateError, Result};

// === Value Coercion ===
pub use coerce::{Coerce, CoerceError, coerce};

// === Schema ===
pub use cache::SchemaCache;
pub use field::FieldSchema;
pub use schema::{Hydratable, TypeSchema, TypeSchemaBuilder};

// === Binding ===
pub use binder::RecordBinder;
pub use record::{Header, Row, split_line};

// === Orchestration ===
pub use hydrator::{Hydrator, HydratorBuilder, hydrate_file};
pub use options::{DEFAULT_DELIMITER, HydratorOptions};
pub use source::{FileLineSource, LineSource, Lines, MemoryLineSource};

// === Configured Records ===
pub use dynamic::{DynamicRecord, FieldSpec, RecordSpec, Value, ValueKind};
