//! Named fragments of one tutorial.

use indexmap::IndexMap;

use super::fragment::Fragment;

/// The root skeleton plus every named fragment, in document order.
///
/// Fences sharing a name accumulate; a later root replaces an earlier one.
#[derive(Debug, Clone, Default)]
pub struct FragmentMap {
    root: Option<Fragment>,
    fragments: IndexMap<String, Vec<Fragment>>,
}

impl FragmentMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root fragment, returning the one it replaced.
    pub fn set_root(&mut self, fragment: Fragment) -> Option<Fragment> {
        self.root.replace(fragment)
    }

    /// Returns the root fragment.
    pub fn root(&self) -> Option<&Fragment> {
        self.root.as_ref()
    }

    /// Appends a fragment under its name.
    pub fn insert(&mut self, fragment: Fragment) {
        self.fragments
            .entry(fragment.name.clone())
            .or_default()
            .push(fragment);
    }

    /// Returns every fence recorded under `name`.
    pub fn get(&self, name: &str) -> &[Fragment] {
        self.fragments.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns true if `name` has at least one fence.
    pub fn contains(&self, name: &str) -> bool {
        self.fragments.contains_key(name)
    }

    /// Joins all fences named `name` in document order.
    ///
    /// Empty fences contribute nothing.
    pub fn concatenate(&self, name: &str) -> Option<String> {
        let fences = self.fragments.get(name)?;
        let parts: Vec<&str> = fences
            .iter()
            .filter(|f| !f.is_empty())
            .map(|f| f.source.as_str())
            .collect();
        Some(parts.join("\n"))
    }

    /// Fragment names in order of first appearance.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fragments.keys().map(String::as_str)
    }

    /// Number of distinct fragment names (the root excluded).
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Returns true if there is neither a root nor any fragment.
    pub fn is_empty(&self) -> bool {
        self.root.is_none() && self.fragments.is_empty()
    }
}
