use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info_span};

use hydrate_core::{DynamicRecord, FileLineSource, Hydrator, RecordSpec, TypeSchema};

use crate::cli::{LoadArgs, SchemaArgs};

/// Records hydrated by `hydrate load`, with the spec that typed them.
#[derive(Debug)]
pub struct LoadResult {
    pub spec: RecordSpec,
    pub records: Vec<DynamicRecord>,
}

/// Reads and parses a TOML record spec.
pub fn load_record_spec(path: &Path) -> Result<RecordSpec> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read record spec {}", path.display()))?;
    let spec: RecordSpec = toml::from_str(&text)
        .with_context(|| format!("parse record spec {}", path.display()))?;
    debug!(
        record = %spec.name,
        fields = spec.fields.len(),
        path = %path.display(),
        "loaded record spec"
    );
    Ok(spec)
}

pub fn run_load(args: &LoadArgs) -> Result<LoadResult> {
    let spec = load_record_spec(&args.spec)?;
    let span = info_span!("load", record = %spec.name, file = %args.file.display());
    let _guard = span.enter();

    let mut options = spec.options.clone();
    if let Some(delimiter) = &args.delimiter {
        options = options.with_delimiter(delimiter.clone());
    }
    let schema = build_schema(&spec)?;
    let hydrator =
        Hydrator::with_schema(schema, FileLineSource, options).context("configure hydrator")?;
    let records = hydrator
        .hydrate_all(&args.file)
        .with_context(|| format!("hydrate {}", args.file.display()))?;
    Ok(LoadResult { spec, records })
}

pub fn run_schema(args: &SchemaArgs) -> Result<TypeSchema<DynamicRecord>> {
    let spec = load_record_spec(&args.spec)?;
    build_schema(&spec)
}

fn build_schema(spec: &RecordSpec) -> Result<TypeSchema<DynamicRecord>> {
    spec.to_schema()
        .with_context(|| format!("build schema for record '{}'", spec.name))
}
