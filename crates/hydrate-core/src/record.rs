//! Header and data rows split from raw lines.

/// Splits `line` on `delimiter`, keeping embedded and trailing empty segments.
///
/// `"a,,b,"` split on `","` yields `["a", "", "b", ""]`. Segments are not
/// trimmed and quotes carry no meaning.
pub fn split_line(line: &str, delimiter: &str) -> Vec<String> {
    line.split(delimiter).map(str::to_string).collect()
}

/// Ordered column names read from the first line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn parse(line: &str, delimiter: &str) -> Self {
        Self::new(split_line(line, delimiter))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Raw values of one data line, positionally aligned with the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based line number in the input (the header is line 1).
    pub line: usize,
    pub values: Vec<String>,
}

impl Row {
    pub fn new(line: usize, values: Vec<String>) -> Self {
        Self { line, values }
    }

    pub fn parse(line_number: usize, line: &str, delimiter: &str) -> Self {
        Self::new(line_number, split_line(line, delimiter))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
