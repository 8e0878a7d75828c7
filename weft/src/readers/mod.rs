//! Readers for tutorials and documented sources.

mod docstrings;
mod markdown;

pub use docstrings::{gather_docstrings, read_docstrings, DocTreeBuilder};
pub use markdown::{parse_tutorial, read_tutorial_file};
