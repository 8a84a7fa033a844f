//! Schema resolution: which columns bind to which fields.
//!
//! A [`TypeSchema`] holds every [`FieldSchema`] of a domain type in
//! declaration order plus two lookup maps:
//!
//! - **alias map**: every declared alias → the field declaring it
//! - **name map**: the bare name of every field *without* aliases → that field
//!
//! Lookups consult the alias map first and fall back to the name map. Declaring
//! aliases on a field replaces its implicit name match, so a field with aliases
//! `["field1", "field3"]` is not reachable through its own name.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{HydrateError, Result};
use crate::field::FieldSchema;

/// A type that can be used as a hydration target.
///
/// Implement it by hand with [`TypeSchema::builder`], or derive it with the
/// [`hydratable!`](crate::hydratable) macro.
pub trait Hydratable: Default + Sized + 'static {
    fn schema() -> Result<TypeSchema<Self>>;
}

/// Immutable set of bindable fields of `T` with column-name lookup.
#[derive(Debug, Clone)]
pub struct TypeSchema<T> {
    type_name: String,
    fields: Vec<FieldSchema<T>>,
    by_name: HashMap<String, usize>,
    by_alias: HashMap<String, usize>,
}

impl<T> TypeSchema<T> {
    pub fn builder(type_name: impl Into<String>) -> TypeSchemaBuilder<T> {
        TypeSchemaBuilder {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldSchema<T>] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Finds a field by its canonical name (not by column name).
    pub fn field(&self, name: &str) -> Option<&FieldSchema<T>> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Resolves a header column to the field it binds to.
    pub fn lookup(&self, column: &str) -> Option<&FieldSchema<T>> {
        self.position(column).map(|idx| &self.fields[idx])
    }

    /// Like [`lookup`](Self::lookup) but returns the field's index in [`fields`](Self::fields).
    pub fn position(&self, column: &str) -> Option<usize> {
        self.by_alias
            .get(column)
            .or_else(|| self.by_name.get(column))
            .copied()
    }

    /// Every accepted column name with the field it resolves to, sorted by column.
    pub fn accepted_columns(&self) -> Vec<(&str, &FieldSchema<T>)> {
        let mut columns: Vec<(&str, &FieldSchema<T>)> = self
            .by_alias
            .iter()
            .chain(
                self.by_name
                    .iter()
                    .filter(|(name, _)| !self.by_alias.contains_key(*name)),
            )
            .map(|(column, idx)| (column.as_str(), &self.fields[*idx]))
            .collect();
        columns.sort_by(|a, b| a.0.cmp(b.0));
        columns
    }
}

/// Collects field descriptors and validates them into a [`TypeSchema`].
#[derive(Debug)]
pub struct TypeSchemaBuilder<T> {
    type_name: String,
    fields: Vec<FieldSchema<T>>,
}

impl<T> TypeSchemaBuilder<T> {
    pub fn field(mut self, field: FieldSchema<T>) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = FieldSchema<T>>,
    {
        self.fields.extend(fields);
        self
    }

    /// Validates the collected fields and builds the lookup maps.
    ///
    /// Fails on duplicate field names, empty names or aliases, and aliases
    /// claimed by more than one field.
    pub fn build(self) -> Result<TypeSchema<T>> {
        let type_name = self.type_name;
        let mut by_name = HashMap::new();
        let mut by_alias: HashMap<String, usize> = HashMap::new();
        let mut seen_names: HashMap<&str, usize> = HashMap::new();

        for (idx, field) in self.fields.iter().enumerate() {
            if field.name().is_empty() || field.column_aliases().iter().any(String::is_empty) {
                return Err(HydrateError::EmptyFieldName { type_name });
            }
            if seen_names.insert(field.name(), idx).is_some() {
                return Err(HydrateError::DuplicateField {
                    type_name,
                    field: field.name().to_string(),
                });
            }
            if !field.has_aliases() {
                by_name.insert(field.name().to_string(), idx);
                continue;
            }
            for alias in field.column_aliases() {
                match by_alias.get(alias) {
                    Some(&owner) if owner != idx => {
                        return Err(HydrateError::AliasConflict {
                            type_name,
                            alias: alias.clone(),
                            first: self.fields[owner].name().to_string(),
                            second: field.name().to_string(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        by_alias.insert(alias.clone(), idx);
                    }
                }
            }
        }

        debug!(
            type_name = %type_name,
            fields = self.fields.len(),
            aliases = by_alias.len(),
            "built type schema"
        );

        Ok(TypeSchema {
            type_name,
            fields: self.fields,
            by_name,
            by_alias,
        })
    }
}
