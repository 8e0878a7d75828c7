//! Tutorial parsing for fragment extraction.

use std::ops::Range;
use std::path::Path;

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};

use crate::config::TangleConfig;
use crate::errors::{read_to_string, Result};
use crate::model::{FenceInfo, Fragment, FragmentMap};
use crate::text_location::TextLocation;
use crate::weave::{fence_language, parser_options};

/// A fenced block whose text is still being collected.
struct OpenFence {
    info: String,
    content: String,
    location: TextLocation,
}

fn line_at(input: &str, offset: usize) -> usize {
    input[..offset].matches('\n').count() + 1
}

/// True when the source of a code block ends with a closing fence.
fn is_closed(input: &str, range: Range<usize>) -> bool {
    let block = input[range].trim_end();
    let mut lines = block.lines();
    let Some(opening) = lines.next() else {
        return false;
    };
    let opening = opening.trim_start();
    let marker = opening.chars().next().unwrap_or('`');
    let width = opening.chars().take_while(|&c| c == marker).count();
    lines.last().is_some_and(|closing| {
        let closing = closing.trim();
        closing.len() >= width && closing.chars().all(|c| c == marker)
    })
}

/// Collects the tangle fragments of a tutorial.
///
/// Fences are found with the same markdown parser that weaves the page, so
/// fences inside lists and quotes count too. Only fences in the tangle
/// language whose info string carries a property group naming a fragment
/// take part; everything else is prose or illustration.
pub fn parse_tutorial(
    input: &str,
    source_path: Option<&Path>,
    config: &TangleConfig,
) -> Result<FragmentMap> {
    let mut map = FragmentMap::new();
    let mut open: Option<OpenFence> = None;

    for (event, range) in Parser::new_ext(input, parser_options()).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                let location = TextLocation::line_only(line_at(input, range.start))
                    .in_file(source_path);
                if !is_closed(input, range) {
                    tracing::warn!(
                        "Unclosed code fence at {}, reading to end of file",
                        location
                    );
                }
                open = Some(OpenFence {
                    info: info.to_string(),
                    content: String::new(),
                    location,
                });
            }
            Event::Text(text) => {
                if let Some(fence) = open.as_mut() {
                    fence.content.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(fence) = open.take() {
                    collect_fence(&mut map, fence, config);
                }
            }
            _ => {}
        }
    }

    Ok(map)
}

fn collect_fence(map: &mut FragmentMap, fence: OpenFence, config: &TangleConfig) {
    if !fence_language(&fence.info).eq_ignore_ascii_case(&config.language) {
        return;
    }

    let info = match FenceInfo::parse(&fence.info) {
        Ok(info) => info,
        Err(message) => {
            tracing::warn!(
                "Ignoring code fence at {} with malformed properties: {}",
                fence.location,
                message
            );
            return;
        }
    };
    let Some(name) = info.properties.fragment_name() else {
        return;
    };

    let mut source = fence.content;
    if source.ends_with('\n') {
        source.pop();
    }

    let fragment = Fragment::new(name, source, fence.location);
    if name == config.root {
        if let Some(previous) = map.set_root(fragment) {
            tracing::warn!(
                "Root fragment at {} replaced by a later one",
                previous.location
            );
        }
    } else {
        map.insert(fragment);
    }
}

/// Reads a tutorial file and collects its fragments.
pub fn read_tutorial_file(path: &Path, config: &TangleConfig) -> Result<FragmentMap> {
    let content = read_to_string(path)?;
    parse_tutorial(&content, Some(path), config)
}
