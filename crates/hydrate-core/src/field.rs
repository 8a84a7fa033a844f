//! Bindable field descriptors.

use std::fmt;
use std::sync::Arc;

use crate::coerce::{Coerce, CoerceError};

type AssignFn<T> = dyn Fn(&mut T, &str) -> Result<(), CoerceError> + Send + Sync;

/// One bindable field of a domain type.
///
/// A field knows its canonical name, the extra column names (aliases) it
/// answers to, the name of its value type, and how to parse a raw string and
/// store the result on a target object.
pub struct FieldSchema<T> {
    name: String,
    aliases: Vec<String>,
    value_type: String,
    assign: Arc<AssignFn<T>>,
}

impl<T: 'static> FieldSchema<T> {
    /// Creates a field whose values are parsed with `V`'s [`Coerce`] impl.
    ///
    /// ```ignore
    /// let field = FieldSchema::new("age", |person: &mut Person, age: u32| person.age = age);
    /// ```
    pub fn new<V, F>(name: impl Into<String>, assign: F) -> Self
    where
        V: Coerce + 'static,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        Self::with_parser(name, V::TYPE_NAME, V::coerce, assign)
    }

    /// Creates a field with an explicit parser instead of the type's default one.
    pub fn with_parser<V, P, F>(
        name: impl Into<String>,
        value_type: impl Into<String>,
        parse: P,
        assign: F,
    ) -> Self
    where
        V: 'static,
        P: Fn(&str) -> Result<V, CoerceError> + Send + Sync + 'static,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            value_type: value_type.into(),
            assign: Arc::new(move |target: &mut T, raw: &str| -> Result<(), CoerceError> {
                let value = parse(raw)?;
                assign(target, value);
                Ok(())
            }),
        }
    }
}

impl<T> FieldSchema<T> {
    /// Adds one column alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Adds several column aliases.
    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn has_aliases(&self) -> bool {
        !self.aliases.is_empty()
    }

    pub fn value_type(&self) -> &str {
        &self.value_type
    }

    /// Parses `raw` and assigns the result to the field on `target`.
    pub fn assign_raw(&self, target: &mut T, raw: &str) -> Result<(), CoerceError> {
        (self.assign)(target, raw)
    }
}

impl<T> Clone for FieldSchema<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            aliases: self.aliases.clone(),
            value_type: self.value_type.clone(),
            assign: Arc::clone(&self.assign),
        }
    }
}

impl<T> fmt::Debug for FieldSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSchema")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("value_type", &self.value_type)
            .finish_non_exhaustive()
    }
}
