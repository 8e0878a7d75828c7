//! Structured doc comment scraping.
//!
//! Source files document their API with `///` comments such as
//!
//! ```text
//! /// Engine ::class:: Central rendering object.
//! /// create ::method static:: Creates an engine.
//! /// canvas ::argument:: The target canvas.
//! /// ::retval:: A new [Engine].
//! ```
//!
//! and enumerations are picked up from binding declarations like
//! `enum_<RgbType>("RgbType")` followed by `.value("sRGB", ...)` lines.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{read_to_string, Result, WeftError};
use crate::model::{DocEntity, TAG_METHOD};
use crate::text_location::TextLocation;

static DOC_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ */// (.+)").unwrap());
static ENUM_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^ *enum_.*"(.*)""#).unwrap());
static ENUM_VALUE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^ *\.value\("(.*)""#).unwrap());
static TAGGED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\S+)? *::(.+):: *(.*)").unwrap());

/// An innermost-open-entity slot on the nesting stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Root,
    Entity(usize),
}

#[derive(Debug, Default)]
struct Node {
    entity: DocEntity,
    children: Vec<usize>,
}

/// Builds the doc tree one source line at a time.
///
/// Entities live in an arena and refer to their children by index; the
/// stack holds the chain of currently open entities.
#[derive(Debug)]
pub struct DocTreeBuilder {
    nodes: Vec<Node>,
    top_level: Vec<usize>,
    stack: Vec<Slot>,
    previous: Option<usize>,
    enumeration: Option<usize>,
}

impl Default for DocTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocTreeBuilder {
    /// Creates a builder with only the root open.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            top_level: Vec::new(),
            stack: vec![Slot::Root],
            previous: None,
            enumeration: None,
        }
    }

    fn alloc(&mut self, entity: DocEntity) -> usize {
        self.nodes.push(Node {
            entity,
            children: Vec::new(),
        });
        self.nodes.len() - 1
    }

    fn top(&self) -> Slot {
        self.stack.last().copied().unwrap_or(Slot::Root)
    }

    fn replace_top(&mut self, slot: Slot) {
        if let Some(last) = self.stack.last_mut() {
            *last = slot;
        }
    }

    fn slot_is_class(&self, slot: Slot) -> bool {
        match slot {
            Slot::Root => false,
            Slot::Entity(idx) => self.nodes[idx].entity.is_class(),
        }
    }

    /// Feeds one source line.
    pub fn push_line(&mut self, line: &str, location: &TextLocation) -> Result<()> {
        if let Some(caps) = DOC_LINE.captures(line) {
            let text = caps.get(1).map_or("", |m| m.as_str());
            return self.push_doc_line(text, location);
        }

        if let Some(caps) = ENUM_LINE.captures(line) {
            let name = caps.get(1).map_or("", |m| m.as_str());
            let idx = self.alloc(DocEntity::enumeration(name));
            self.top_level.push(idx);
            self.enumeration = Some(idx);
            return Ok(());
        }

        if let Some(caps) = ENUM_VALUE.captures(line) {
            let value = caps.get(1).map_or("", |m| m.as_str());
            let Some(enumeration) = self.enumeration else {
                return Err(WeftError::Parse {
                    location: location.clone(),
                    message: format!("enum value \"{}\" outside of an enum declaration", value),
                });
            };
            let idx = self.alloc(DocEntity::enum_value(value));
            self.nodes[enumeration].children.push(idx);
        }

        Ok(())
    }

    fn push_doc_line(&mut self, text: &str, location: &TextLocation) -> Result<()> {
        let Some(caps) = TAGGED.captures(text) else {
            match self.previous {
                Some(idx) => self.nodes[idx].entity.continue_with(text),
                None => tracing::warn!("{}: doc comment before any tagged entity", location),
            }
            return Ok(());
        };

        let name = caps.get(1).map_or("", |m| m.as_str());
        let tags: Vec<String> = caps
            .get(2)
            .map_or("", |m| m.as_str())
            .split_whitespace()
            .map(str::to_string)
            .collect();
        let brief = caps.get(3).map_or("", |m| m.as_str());
        let entity = DocEntity::new(name, tags, brief);

        let top = self.top();
        let is_type = entity.is_class() || entity.is_function();
        let is_method = entity.has_tag(TAG_METHOD);
        let is_member = entity.is_argument() || entity.is_retval();

        let idx = self.alloc(entity);
        match top {
            Slot::Root => {
                self.top_level.push(idx);
                self.stack.push(Slot::Entity(idx));
            }
            _ if is_type => {
                self.top_level.push(idx);
                self.replace_top(Slot::Entity(idx));
            }
            Slot::Entity(parent) if is_method && self.slot_is_class(top) => {
                self.nodes[parent].children.push(idx);
                self.stack.push(Slot::Entity(idx));
            }
            _ if is_method => {
                let below = self.stack.len().checked_sub(2).map(|i| self.stack[i]);
                match below {
                    Some(Slot::Entity(parent)) => {
                        self.nodes[parent].children.push(idx);
                        self.replace_top(Slot::Entity(idx));
                    }
                    _ => {
                        return Err(self.nesting_error(idx, location, "a method outside of a class"));
                    }
                }
            }
            Slot::Entity(parent) if is_member => {
                self.nodes[parent].children.push(idx);
            }
            _ => return Err(self.nesting_error(idx, location, "an unexpected tag here")),
        }

        self.previous = Some(idx);
        Ok(())
    }

    fn nesting_error(&self, idx: usize, location: &TextLocation, what: &str) -> WeftError {
        let entity = &self.nodes[idx].entity;
        WeftError::Parse {
            location: location.clone(),
            message: format!(
                "'{}' with tags [{}] is {}",
                entity.name,
                entity.tags.join(" "),
                what
            ),
        }
    }

    /// Consumes the builder, returning the top-level entities in source order.
    pub fn finish(mut self) -> Vec<DocEntity> {
        let top_level = std::mem::take(&mut self.top_level);
        top_level
            .into_iter()
            .map(|idx| assemble(&mut self.nodes, idx))
            .collect()
    }
}

fn assemble(nodes: &mut [Node], idx: usize) -> DocEntity {
    let children = std::mem::take(&mut nodes[idx].children);
    let mut entity = std::mem::take(&mut nodes[idx].entity);
    entity.children = children
        .into_iter()
        .map(|child| assemble(nodes, child))
        .collect();
    entity
}

/// Builds the doc tree from named sources, processed as one stream of lines.
pub fn gather_docstrings<'a, I>(sources: I) -> Result<Vec<DocEntity>>
where
    I: IntoIterator<Item = (&'a Path, &'a str)>,
{
    let mut builder = DocTreeBuilder::new();
    for (path, content) in sources {
        for (index, line) in content.lines().enumerate() {
            let location = TextLocation::file_line(path, index + 1);
            builder.push_line(line, &location)?;
        }
    }
    Ok(builder.finish())
}

/// Reads the given files and builds their doc tree.
pub fn read_docstrings(paths: &[PathBuf]) -> Result<Vec<DocEntity>> {
    let contents = paths
        .iter()
        .map(|p| read_to_string(p).map(|c| (p.as_path(), c)))
        .collect::<Result<Vec<_>>>()?;
    gather_docstrings(contents.iter().map(|(p, c)| (*p, c.as_str())))
}
