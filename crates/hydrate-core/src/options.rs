//! Configuration options for hydration runs.

use serde::{Deserialize, Serialize};

use crate::error::{HydrateError, Result};

/// Default column delimiter.
pub const DEFAULT_DELIMITER: &str = ",";

/// Options controlling how input lines are split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HydratorOptions {
    /// Column delimiter. Any non-empty string, e.g. `","`, `"\t"` or `"||"`.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

fn default_delimiter() -> String {
    DEFAULT_DELIMITER.to_string()
}

impl Default for HydratorOptions {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
        }
    }
}

impl HydratorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Options for tab-separated input.
    pub fn tab_separated() -> Self {
        Self::default().with_delimiter("\t")
    }

    pub fn validate(&self) -> Result<()> {
        if self.delimiter.is_empty() {
            return Err(HydrateError::EmptyDelimiter);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_comma() {
        let options = HydratorOptions::default();
        assert_eq!(options.delimiter, ",");
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_empty_delimiter_is_rejected() {
        let options = HydratorOptions::new().with_delimiter("");
        assert!(matches!(
            options.validate(),
            Err(HydrateError::EmptyDelimiter)
        ));
    }

    #[test]
    fn test_deserialize_with_default_delimiter() {
        let options: HydratorOptions = toml::from_str("").unwrap();
        assert_eq!(options, HydratorOptions::default());

        let options: HydratorOptions = toml::from_str("delimiter = \"\\t\"").unwrap();
        assert_eq!(options, HydratorOptions::tab_separated());
    }
}
