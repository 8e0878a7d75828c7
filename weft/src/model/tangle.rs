//! Placeholder substitution for tangling.

use std::collections::HashSet;

use regex::Regex;

use crate::errors::{Result, WeftError};

use super::fragment_map::FragmentMap;

/// Matches placeholder comment lines such as `// TODO: create wombat`.
#[derive(Debug, Clone)]
pub struct Placeholder {
    pattern: Regex,
}

impl Placeholder {
    /// Builds a matcher for the given comment marker, e.g. `// TODO:`.
    pub fn new(marker: &str) -> Result<Self> {
        let marker = marker.trim();
        if marker.is_empty() {
            return Err(WeftError::Config("placeholder marker is empty".to_string()));
        }
        let pattern = Regex::new(&format!(
            r"^\s*{}\s(?P<label>.+)$",
            regex::escape(marker)
        ))
        .map_err(|e| WeftError::Config(format!("invalid placeholder marker: {}", e)))?;
        Ok(Self { pattern })
    }

    /// Returns the label of a placeholder line.
    pub fn label<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(line)
            .and_then(|caps| caps.name("label"))
            .map(|m| m.as_str().trim())
            .filter(|label| !label.is_empty())
    }
}

/// Result of substituting fragments into the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tangled {
    /// The assembled source, newline terminated (empty when there is no root).
    pub text: String,
    /// Fragments that no placeholder referenced, in document order.
    pub unused: Vec<String>,
}

/// Substitutes placeholders in the root with their fragments.
///
/// Substitution is a single pass over the root: a placeholder line naming a
/// fragment is replaced by that fragment's text, which is not scanned again.
/// Placeholders whose label names no fragment are kept verbatim. Fragment
/// text is inserted as written; the beautifier fixes indentation later.
pub fn tangle_fragments(
    fragments: &FragmentMap,
    placeholder: &Placeholder,
    root_name: &str,
) -> Result<Tangled> {
    let Some(root) = fragments.root() else {
        tracing::debug!("No '{}' fragment to tangle", root_name);
        return Ok(Tangled {
            text: String::new(),
            unused: fragments.names().map(str::to_string).collect(),
        });
    };

    let mut used: HashSet<&str> = HashSet::new();
    let mut output: Vec<String> = Vec::new();
    for line in root.source.lines() {
        let substitute = placeholder
            .label(line)
            .and_then(|label| fragments.names().find(|name| *name == label))
            .and_then(|name| fragments.concatenate(name).map(|body| (name, body)));

        match substitute {
            Some((name, body)) => {
                used.insert(name);
                output.push(body);
            }
            None => output.push(line.to_string()),
        }
    }

    let unused = fragments
        .names()
        .filter(|name| !used.contains(name))
        .map(str::to_string)
        .collect();

    let mut text = output.join("\n");
    text.push('\n');
    Ok(Tangled { text, unused })
}
