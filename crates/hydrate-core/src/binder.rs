//! Binding one data row onto a domain object.

use tracing::{debug, trace};

use crate::error::{HydrateError, Result};
use crate::record::{Header, Row};
use crate::schema::TypeSchema;

/// Binds rows against a header that has been resolved once against a schema.
///
/// For each `(column, value)` pair the binder:
/// 1. skips empty values, so the field keeps its default;
/// 2. skips columns with no matching field;
/// 3. otherwise parses the value and assigns it.
///
/// Columns are processed left to right, so when two columns resolve to the
/// same field the rightmost non-empty one wins.
#[derive(Debug)]
pub struct RecordBinder<'a, T> {
    schema: &'a TypeSchema<T>,
    header: &'a Header,
    resolved: Vec<Option<usize>>,
}

impl<'a, T> RecordBinder<'a, T> {
    pub fn new(schema: &'a TypeSchema<T>, header: &'a Header) -> Self {
        let resolved: Vec<Option<usize>> = header
            .columns()
            .iter()
            .map(|column| schema.position(column))
            .collect();

        let ignored: Vec<&str> = header
            .columns()
            .iter()
            .zip(&resolved)
            .filter(|(_, field)| field.is_none())
            .map(|(column, _)| column.as_str())
            .collect();
        if !ignored.is_empty() {
            debug!(
                type_name = schema.type_name(),
                ignored = ?ignored,
                "header columns without a matching field"
            );
        }

        Self {
            schema,
            header,
            resolved,
        }
    }

    /// Number of header columns that bind to a field.
    pub fn bound_columns(&self) -> usize {
        self.resolved.iter().filter(|field| field.is_some()).count()
    }

    /// Populates `target` from `row` and returns it.
    pub fn bind(&self, row: &Row, mut target: T) -> Result<T> {
        if row.len() != self.header.len() {
            return Err(HydrateError::ShapeMismatch {
                line: row.line,
                expected: self.header.len(),
                actual: row.len(),
            });
        }

        for ((column, value), field_idx) in self
            .header
            .columns()
            .iter()
            .zip(&row.values)
            .zip(&self.resolved)
        {
            if value.is_empty() {
                continue;
            }
            let Some(idx) = field_idx else {
                continue;
            };
            let field = &self.schema.fields()[*idx];
            field
                .assign_raw(&mut target, value)
                .map_err(|err| HydrateError::Parse {
                    line: row.line,
                    column: column.clone(),
                    field: field.name().to_string(),
                    value: value.clone(),
                    value_type: field.value_type().to_string(),
                    message: err.message().to_string(),
                })?;
        }

        trace!(line = row.line, "bound row");
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldSchema;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Simple {
        field0: i32,
        field1: Option<String>,
        field2: f64,
    }

    fn simple_schema() -> TypeSchema<Simple> {
        TypeSchema::builder("Simple")
            .field(FieldSchema::new("field0", |t: &mut Simple, v: i32| {
                t.field0 = v;
            }))
            .field(FieldSchema::new(
                "field1",
                |t: &mut Simple, v: Option<String>| t.field1 = v,
            ))
            .field(FieldSchema::new("field2", |t: &mut Simple, v: f64| {
                t.field2 = v;
            }))
            .build()
            .unwrap()
    }

    fn simple(field0: i32, field1: Option<&str>, field2: f64) -> Simple {
        Simple {
            field0,
            field1: field1.map(str::to_string),
            field2,
        }
    }

    #[test]
    fn test_bind_all_columns() {
        let schema = simple_schema();
        let header = Header::parse("field0,field1,field2", ",");
        let binder = RecordBinder::new(&schema, &header);
        let row = Row::parse(2, "1,4,2.5", ",");
        let bound = binder.bind(&row, Simple::default()).unwrap();
        assert_eq!(bound, simple(1, Some("4"), 2.5));
        assert_eq!(binder.bound_columns(), 3);
    }

    #[test]
    fn test_empty_value_keeps_default() {
        let schema = simple_schema();
        let header = Header::parse("field0,field1,field2", ",");
        let binder = RecordBinder::new(&schema, &header);
        let bound = binder
            .bind(&Row::parse(2, ",j,", ","), Simple::default())
            .unwrap();
        assert_eq!(bound, simple(0, Some("j"), 0.0));
    }

    #[test]
    fn test_empty_value_does_not_touch_prefilled_target() {
        let schema = simple_schema();
        let header = Header::parse("field0,field1,field2", ",");
        let binder = RecordBinder::new(&schema, &header);
        let prefilled = simple(9, Some("keep"), 1.5);
        let bound = binder
            .bind(&Row::parse(2, ",,", ","), prefilled.clone())
            .unwrap();
        assert_eq!(bound, prefilled);
    }

    #[test]
    fn test_unknown_columns_are_ignored() {
        let schema = simple_schema();
        let header = Header::parse("extra,field0,field1,field2,", ",");
        let binder = RecordBinder::new(&schema, &header);
        let bound = binder
            .bind(&Row::parse(2, "zzz,3,is awesome,1.25,tail", ","), Simple::default())
            .unwrap();
        assert_eq!(bound, simple(3, Some("is awesome"), 1.25));
        assert_eq!(binder.bound_columns(), 3);
    }

    #[test]
    fn test_later_column_overwrites_same_field() {
        let schema = simple_schema();
        let header = Header::parse("field0,field0", ",");
        let binder = RecordBinder::new(&schema, &header);
        let bound = binder
            .bind(&Row::parse(2, "1,2", ","), Simple::default())
            .unwrap();
        assert_eq!(bound.field0, 2);

        let bound = binder
            .bind(&Row::parse(3, "1,", ","), Simple::default())
            .unwrap();
        assert_eq!(bound.field0, 1);
    }

    #[test]
    fn test_rightmost_alias_column_wins() {
        let schema = TypeSchema::builder("Simple")
            .field(FieldSchema::new("field0", |t: &mut Simple, v: i32| {
                t.field0 = v;
            }))
            .field(
                FieldSchema::new("att1", |t: &mut Simple, v: Option<String>| t.field1 = v)
                    .aliases(["field1", "field3"]),
            )
            .build()
            .unwrap();
        let header = Header::parse("field0,field1,field3", ",");
        let binder = RecordBinder::new(&schema, &header);
        assert_eq!(binder.bound_columns(), 3);

        let bound = binder
            .bind(&Row::parse(2, "5,left,right", ","), Simple::default())
            .unwrap();
        assert_eq!(bound.field1.as_deref(), Some("right"));

        let bound = binder
            .bind(&Row::parse(3, "5,left,", ","), Simple::default())
            .unwrap();
        assert_eq!(bound.field1.as_deref(), Some("left"));
    }

    #[test]
    fn test_shape_mismatch() {
        let schema = simple_schema();
        let header = Header::parse("field0,field1,field2", ",");
        let binder = RecordBinder::new(&schema, &header);
        for line in ["1,2", "1,2,3,4"] {
            let err = binder
                .bind(&Row::parse(5, line, ","), Simple::default())
                .unwrap_err();
            assert!(matches!(
                err,
                HydrateError::ShapeMismatch {
                    line: 5,
                    expected: 3,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_parse_error_names_field_and_value() {
        let schema = simple_schema();
        let header = Header::parse("field0,field1,field2", ",");
        let binder = RecordBinder::new(&schema, &header);
        let err = binder
            .bind(&Row::parse(7, "seven,x,1.0", ","), Simple::default())
            .unwrap_err();
        match err {
            HydrateError::Parse {
                line,
                column,
                field,
                value,
                value_type,
                ..
            } => {
                assert_eq!(line, 7);
                assert_eq!(column, "field0");
                assert_eq!(field, "field0");
                assert_eq!(value, "seven");
                assert_eq!(value_type, "i32");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_binding_is_deterministic() {
        let schema = simple_schema();
        let header = Header::parse("field1,field0,field2,field1", ",");
        let binder = RecordBinder::new(&schema, &header);
        let row = Row::parse(2, "a,1,0.5,b", ",");
        let first = binder.bind(&row, Simple::default()).unwrap();
        let second = binder.bind(&row, Simple::default()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.field1.as_deref(), Some("b"));
    }
}
