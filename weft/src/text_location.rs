//! Source positions for diagnostics.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// A line within a (possibly unnamed) text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TextLocation {
    /// The file path, if known.
    pub filename: Option<PathBuf>,
    /// Line number (1-indexed).
    pub line: usize,
}

impl TextLocation {
    /// Creates a location with only line information.
    pub fn line_only(line: usize) -> Self {
        Self {
            filename: None,
            line,
        }
    }

    /// Creates a location with file and line.
    pub fn file_line(filename: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            filename: Some(filename.into()),
            line,
        }
    }

    /// Attaches a filename when one is available.
    pub fn in_file(mut self, filename: Option<&Path>) -> Self {
        if let Some(path) = filename {
            self.filename = Some(path.to_path_buf());
        }
        self
    }
}

impl Default for TextLocation {
    fn default() -> Self {
        Self::line_only(1)
    }
}

impl fmt::Display for TextLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.filename {
            Some(path) => write!(f, "{}:{}", path.display(), self.line),
            None => write!(f, "line {}", self.line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_filename() {
        let loc = TextLocation::file_line("tutorial_triangle.md", 10);
        assert_eq!(loc.to_string(), "tutorial_triangle.md:10");
    }

    #[test]
    fn test_display_without_filename() {
        assert_eq!(TextLocation::line_only(7).to_string(), "line 7");
    }

    #[test]
    fn test_in_file() {
        let loc = TextLocation::line_only(3).in_file(Some(Path::new("a.md")));
        assert_eq!(loc.filename, Some(PathBuf::from("a.md")));

        let unchanged = TextLocation::line_only(3).in_file(None);
        assert!(unchanged.filename.is_none());
    }
}
