//! Line sources: the only I/O seam of the hydrator.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{HydrateError, Result};

/// A lazily-read sequence of lines. Dropping it releases the underlying resource.
pub type Lines<'a> = Box<dyn Iterator<Item = Result<String>> + 'a>;

/// Produces the raw text lines found at a location.
pub trait LineSource {
    fn open(&self, location: &Path) -> Result<Lines<'_>>;
}

/// Reads lines from a file with a buffered reader.
///
/// A UTF-8 byte-order mark at the start of the file is stripped, and both `\n`
/// and `\r\n` line endings are accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLineSource;

impl LineSource for FileLineSource {
    fn open(&self, location: &Path) -> Result<Lines<'_>> {
        let file = File::open(location).map_err(|e| HydrateError::Open {
            path: location.to_path_buf(),
            source: e,
        })?;
        let path: PathBuf = location.to_path_buf();
        let lines = BufReader::new(file)
            .lines()
            .enumerate()
            .map(move |(idx, line_result)| {
                let line = line_result.map_err(|e| HydrateError::Read {
                    path: path.clone(),
                    line: idx + 1,
                    source: e,
                })?;
                // Skip BOM if present
                if idx == 0 {
                    if let Some(stripped) = line.strip_prefix('\u{feff}') {
                        return Ok(stripped.to_string());
                    }
                }
                Ok(line)
            });
        Ok(Box::new(lines))
    }
}

/// Serves a fixed list of lines regardless of the requested location.
#[derive(Debug, Clone, Default)]
pub struct MemoryLineSource {
    lines: Vec<String>,
}

impl MemoryLineSource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Splits `text` into lines the same way a file would be read.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines())
    }
}

impl LineSource for MemoryLineSource {
    fn open(&self, _location: &Path) -> Result<Lines<'_>> {
        Ok(Box::new(self.lines.iter().cloned().map(Ok)))
    }
}

impl<S: LineSource + ?Sized> LineSource for &S {
    fn open(&self, location: &Path) -> Result<Lines<'_>> {
        (**self).open(location)
    }
}
