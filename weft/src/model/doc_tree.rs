//! API documentation entities scraped from source comments.

use serde::Serialize;

/// Tag carried by top-level class entities.
pub const TAG_CLASS: &str = "class";
/// Tag carried by free functions.
pub const TAG_FUNCTION: &str = "function";
/// Tag carried by methods.
pub const TAG_METHOD: &str = "method";
/// Tag carried by method and function arguments.
pub const TAG_ARGUMENT: &str = "argument";
/// Tag carried by return value descriptions.
pub const TAG_RETVAL: &str = "retval";
/// Tag carried by enumerations.
pub const TAG_ENUM: &str = "enum";
/// Tag carried by enumeration values.
pub const TAG_VALUE: &str = "value";
/// Tag marking static methods.
pub const TAG_STATIC: &str = "static";

/// A documented entity: class, function, method, argument, return value,
/// enum or enum value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocEntity {
    /// Entity name; empty for anonymous entries such as return values.
    pub name: String,
    /// Tags from the `::tags::` marker.
    pub tags: Vec<String>,
    /// One-line description.
    pub brief: String,
    /// Follow-up paragraph, if any.
    pub detail: Option<String>,
    /// Nested entities in source order.
    pub children: Vec<DocEntity>,
}

impl DocEntity {
    /// Creates an entity from a tagged doc line.
    pub fn new(name: impl Into<String>, tags: Vec<String>, brief: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags,
            brief: brief.into(),
            detail: None,
            children: Vec::new(),
        }
    }

    /// Creates an enumeration entity.
    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::new(name, vec![TAG_ENUM.to_string()], "")
    }

    /// Creates an enumeration value.
    pub fn enum_value(name: impl Into<String>) -> Self {
        Self::new(name, vec![TAG_VALUE.to_string()], "")
    }

    /// Returns true if the entity carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn is_class(&self) -> bool {
        self.has_tag(TAG_CLASS)
    }

    pub fn is_function(&self) -> bool {
        self.has_tag(TAG_FUNCTION)
    }

    pub fn is_enum(&self) -> bool {
        self.has_tag(TAG_ENUM)
    }

    pub fn is_argument(&self) -> bool {
        self.has_tag(TAG_ARGUMENT)
    }

    pub fn is_retval(&self) -> bool {
        self.has_tag(TAG_RETVAL)
    }

    pub fn is_static(&self) -> bool {
        self.has_tag(TAG_STATIC)
    }

    /// Names of the argument children, in order.
    pub fn argument_names(&self) -> Vec<&str> {
        self.children
            .iter()
            .filter(|c| c.is_argument())
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Adds a continuation line from an untagged doc comment.
    ///
    /// A brief ending in a backslash continues onto this line; otherwise the
    /// line starts or extends the detail paragraph.
    pub fn continue_with(&mut self, line: &str) {
        if let Some(head) = self.brief.strip_suffix('\\') {
            self.brief = format!("{}{}", head, line);
        } else {
            match &mut self.detail {
                Some(detail) if !detail.is_empty() => {
                    detail.push(' ');
                    detail.push_str(line);
                }
                _ => self.detail = Some(line.to_string()),
            }
        }
    }
}
