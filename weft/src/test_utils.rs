//! Shared test utilities.

use crate::model::Fragment;
use crate::text_location::TextLocation;

/// Creates a test fragment with the given name and source.
pub fn make_fragment(name: &str, source: &str) -> Fragment {
    Fragment::new(name, source, TextLocation::default())
}
