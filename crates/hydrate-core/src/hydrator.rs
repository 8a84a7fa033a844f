//! Hydration orchestration: header first, then one object per data line.

use std::marker::PhantomData;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, info_span};

use crate::binder::RecordBinder;
use crate::cache::SchemaCache;
use crate::error::{HydrateError, Result};
use crate::options::HydratorOptions;
use crate::record::{Header, Row};
use crate::schema::{Hydratable, TypeSchema};
use crate::source::{FileLineSource, LineSource};

/// Hydrates delimiter-separated input into objects of type `T`.
///
/// The schema of `T` is resolved once, when the hydrator is built, and shared
/// through the process-wide [`SchemaCache`].
///
/// # Example
///
/// ```ignore
/// use hydrate_core::{Hydrator, hydratable};
///
/// #[derive(Debug, Default)]
/// struct Reading {
///     sensor: String,
///     value: f64,
/// }
///
/// hydratable! {
///     Reading {
///         sensor: String,
///         value: f64 => ["reading", "value"],
///     }
/// }
///
/// let readings = Hydrator::<Reading>::new()?.hydrate_all("readings.csv")?;
/// ```
#[derive(Debug)]
pub struct Hydrator<T, S = FileLineSource> {
    schema: Arc<TypeSchema<T>>,
    source: S,
    options: HydratorOptions,
}

impl<T: Hydratable> Hydrator<T> {
    /// File-backed hydrator with the default `,` delimiter.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> HydratorBuilder<T> {
        HydratorBuilder {
            source: FileLineSource,
            options: HydratorOptions::default(),
            _target: PhantomData,
        }
    }
}

impl<T: Default, S: LineSource> Hydrator<T, S> {
    /// Creates a hydrator from an explicit schema, e.g. one built from configuration.
    pub fn with_schema(
        schema: impl Into<Arc<TypeSchema<T>>>,
        source: S,
        options: HydratorOptions,
    ) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            schema: schema.into(),
            source,
            options,
        })
    }

    pub fn schema(&self) -> &TypeSchema<T> {
        &self.schema
    }

    pub fn options(&self) -> &HydratorOptions {
        &self.options
    }

    /// Reads only the header line at `location`.
    pub fn read_header(&self, location: impl AsRef<Path>) -> Result<Header> {
        let location = location.as_ref();
        let mut lines = self.source.open(location)?;
        match lines.next() {
            Some(line) => Ok(Header::parse(&line?, &self.options.delimiter)),
            None => Err(HydrateError::MissingHeader {
                path: location.to_path_buf(),
            }),
        }
    }

    /// Hydrates every data line at `location`, in input order.
    ///
    /// The first line is the header. Any failure aborts the whole run and no
    /// partial result is returned. The source is released before returning,
    /// whether or not hydration succeeded.
    pub fn hydrate_all(&self, location: impl AsRef<Path>) -> Result<Vec<T>> {
        let location = location.as_ref();
        let span = info_span!(
            "hydrate",
            type_name = self.schema.type_name(),
            path = %location.display()
        );
        let _guard = span.enter();

        let lines = self.source.open(location)?;
        self.hydrate_from(location, lines)
    }

    /// Hydrates an already-produced sequence of lines.
    pub fn hydrate_lines<I, L>(&self, lines: I) -> Result<Vec<T>>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let lines = lines.into_iter().map(|line| Ok(line.as_ref().to_string()));
        self.hydrate_from(Path::new("<memory>"), lines)
    }

    fn hydrate_from<I>(&self, location: &Path, lines: I) -> Result<Vec<T>>
    where
        I: IntoIterator<Item = Result<String>>,
    {
        let delimiter = self.options.delimiter.as_str();
        let mut lines = lines.into_iter();
        let header = match lines.next() {
            Some(line) => Header::parse(&line?, delimiter),
            None => {
                return Err(HydrateError::MissingHeader {
                    path: location.to_path_buf(),
                });
            }
        };

        let binder = RecordBinder::new(&self.schema, &header);
        debug!(
            columns = header.len(),
            bound = binder.bound_columns(),
            "resolved header"
        );

        let mut records = Vec::new();
        for (idx, line) in lines.enumerate() {
            // Header is line 1.
            let row = Row::parse(idx + 2, &line?, delimiter);
            records.push(binder.bind(&row, T::default())?);
        }

        info!(records = records.len(), "hydrated records");
        Ok(records)
    }
}

/// Builder for [`Hydrator`]: choose the line source and delimiter.
#[derive(Debug)]
pub struct HydratorBuilder<T, S = FileLineSource> {
    source: S,
    options: HydratorOptions,
    _target: PhantomData<fn() -> T>,
}

impl<T: Hydratable, S: LineSource> HydratorBuilder<T, S> {
    /// Replaces the line source.
    pub fn source<S2: LineSource>(self, source: S2) -> HydratorBuilder<T, S2> {
        HydratorBuilder {
            source,
            options: self.options,
            _target: PhantomData,
        }
    }

    #[must_use]
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.options.delimiter = delimiter.into();
        self
    }

    #[must_use]
    pub fn options(mut self, options: HydratorOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolves the schema of `T` (cached per type) and builds the hydrator.
    pub fn build(self) -> Result<Hydrator<T, S>> {
        let schema = SchemaCache::global().get_or_build::<T>()?;
        Hydrator::with_schema(schema, self.source, self.options)
    }
}

/// Hydrates the file at `path` into objects of `T` with default options.
pub fn hydrate_file<T: Hydratable>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    Hydrator::<T>::new()?.hydrate_all(path)
}
