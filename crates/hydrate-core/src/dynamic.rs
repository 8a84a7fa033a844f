//! Records whose fields are declared by configuration instead of a Rust type.
//!
//! A [`RecordSpec`] lists field names, value kinds and aliases. It is usually
//! loaded from TOML:
//!
//! ```toml
//! name = "reading"
//!
//! [options]
//! delimiter = ";"
//!
//! [[field]]
//! name = "sensor"
//! aliases = ["sensor_id", "device"]
//!
//! [[field]]
//! name = "value"
//! type = "float"
//! ```
//!
//! [`RecordSpec::to_schema`] turns it into a [`TypeSchema<DynamicRecord>`];
//! hydrated values land in the record's map under the canonical field name.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::coerce::{Coerce, CoerceError};
use crate::error::{HydrateError, Result};
use crate::field::FieldSchema;
use crate::options::HydratorOptions;
use crate::schema::TypeSchema;

/// Value kinds a configured field can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Text,
    Integer,
    Float,
    Boolean,
    Date,
}

impl ValueKind {
    pub const ALL: [ValueKind; 5] = [
        ValueKind::Text,
        ValueKind::Integer,
        ValueKind::Float,
        ValueKind::Boolean,
        ValueKind::Date,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Boolean => "boolean",
            ValueKind::Date => "date",
        }
    }

    /// Parses `raw` into a [`Value`] of this kind.
    pub fn parse(self, raw: &str) -> std::result::Result<Value, CoerceError> {
        match self {
            ValueKind::Text => String::coerce(raw).map(Value::Text),
            ValueKind::Integer => i64::coerce(raw).map(Value::Integer),
            ValueKind::Float => f64::coerce(raw).map(Value::Float),
            ValueKind::Boolean => bool::coerce(raw).map(Value::Boolean),
            ValueKind::Date => NaiveDate::coerce(raw).map(Value::Date),
        }
    }
}

impl FromStr for ValueKind {
    type Err = CoerceError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lowered)
            .ok_or_else(|| CoerceError::new(format!("unknown value kind '{s}'")))
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A hydrated value of a configured field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(value) => f.write_str(value),
            Value::Integer(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::Boolean(value) => write!(f, "{value}"),
            Value::Date(value) => write!(f, "{}", value.format("%Y-%m-%d")),
        }
    }
}

/// Field values keyed by canonical field name. Unset fields are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DynamicRecord {
    values: BTreeMap<String, Value>,
}

impl DynamicRecord {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(field.into(), value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(field, value)| (field.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One configured field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    /// Value kind name; see [`ValueKind`].
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

fn default_kind() -> String {
    ValueKind::Text.as_str().to_string()
}

/// A configured record type: its name, input options and fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSpec {
    pub name: String,
    #[serde(default)]
    pub options: HydratorOptions,
    #[serde(rename = "field", default)]
    pub fields: Vec<FieldSpec>,
}

impl RecordSpec {
    /// Builds the schema described by this spec.
    ///
    /// Fails when a field names an unknown value kind, in addition to the
    /// usual schema checks.
    pub fn to_schema(&self) -> Result<TypeSchema<DynamicRecord>> {
        let mut builder = TypeSchema::builder(self.name.clone());
        for spec in &self.fields {
            let kind: ValueKind = spec.kind.parse().map_err(|_| HydrateError::UnknownValueType {
                field: spec.name.clone(),
                value_type: spec.kind.clone(),
            })?;
            let key = spec.name.clone();
            let field = FieldSchema::with_parser(
                spec.name.clone(),
                kind.as_str(),
                move |raw: &str| kind.parse(raw),
                move |record: &mut DynamicRecord, value: Value| {
                    record.insert(key.clone(), value);
                },
            )
            .aliases(spec.aliases.iter().cloned());
            builder = builder.field(field);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const READING_SPEC: &str = r#"
name = "reading"

[options]
delimiter = ";"

[[field]]
name = "sensor"
aliases = ["sensor_id", "device"]

[[field]]
name = "value"
type = "float"

[[field]]
name = "taken"
type = "Date"
"#;

    #[test]
    fn test_value_kind_from_str() {
        assert_eq!("integer".parse::<ValueKind>().unwrap(), ValueKind::Integer);
        assert_eq!(" Boolean ".parse::<ValueKind>().unwrap(), ValueKind::Boolean);
        assert!("decimal".parse::<ValueKind>().is_err());
    }

    #[test]
    fn test_value_kind_parse() {
        assert_eq!(ValueKind::Integer.parse("42").unwrap(), Value::Integer(42));
        assert_eq!(
            ValueKind::Text.parse("42").unwrap(),
            Value::Text("42".to_string())
        );
        assert!(ValueKind::Date.parse("yesterday").is_err());
    }

    #[test]
    fn test_spec_from_toml() {
        let spec: RecordSpec = toml::from_str(READING_SPEC).unwrap();
        assert_eq!(spec.name, "reading");
        assert_eq!(spec.options.delimiter, ";");
        assert_eq!(spec.fields.len(), 3);
        assert_eq!(spec.fields[0].kind, "text");
        assert_eq!(spec.fields[0].aliases, vec!["sensor_id", "device"]);
    }

    #[test]
    fn test_spec_to_schema() {
        let spec: RecordSpec = toml::from_str(READING_SPEC).unwrap();
        let schema = spec.to_schema().unwrap();
        assert_eq!(schema.type_name(), "reading");
        assert_eq!(schema.lookup("device").unwrap().name(), "sensor");
        assert!(schema.lookup("sensor").is_none());
        assert_eq!(schema.lookup("value").unwrap().value_type(), "float");
        assert_eq!(schema.lookup("taken").unwrap().value_type(), "date");

        let mut record = DynamicRecord::default();
        schema
            .lookup("value")
            .unwrap()
            .assign_raw(&mut record, "1.5")
            .unwrap();
        assert_eq!(record.get("value"), Some(&Value::Float(1.5)));
    }

    #[test]
    fn test_unknown_kind_is_schema_error() {
        let spec = RecordSpec {
            name: "broken".to_string(),
            options: HydratorOptions::default(),
            fields: vec![FieldSpec {
                name: "amount".to_string(),
                kind: "money".to_string(),
                aliases: Vec::new(),
            }],
        };
        let err = spec.to_schema().unwrap_err();
        assert!(err.is_schema_error());
        assert!(matches!(
            err,
            HydrateError::UnknownValueType { ref field, ref value_type }
                if field == "amount" && value_type == "money"
        ));
    }

    #[test]
    fn test_record_serializes_as_map() {
        let mut record = DynamicRecord::default();
        record.insert("id", Value::Integer(1));
        record.insert("name", Value::Text("csv".to_string()));
        record.insert(
            "day",
            Value::Date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
        );
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"day":"2024-01-15","id":1,"name":"csv"}"#);
        assert_eq!(record.len(), 3);
    }
}
