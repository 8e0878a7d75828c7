//! Code fragments collected from tutorial fences.

use crate::text_location::TextLocation;

/// One fenced code block contributing to a named fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Fragment name from the fence properties.
    pub name: String,

    /// The code, without the fence lines and without a trailing newline.
    pub source: String,

    /// Location of the opening fence.
    pub location: TextLocation,
}

impl Fragment {
    /// Creates a new fragment.
    pub fn new(name: impl Into<String>, source: impl Into<String>, location: TextLocation) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            location,
        }
    }

    /// Returns the line count of the source.
    pub fn line_count(&self) -> usize {
        self.source.lines().count()
    }

    /// Returns true if the fence had no content.
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}
