//! Per-tutorial outputs: woven page, tangled script and demo page.

use std::path::Path;

use crate::beautify::beautify;
use crate::errors::{read_to_string, Result};
use crate::model::{tangle_fragments, Placeholder};
use crate::readers::read_tutorial_file;
use crate::weave::{demo_frame, fill_template, weave_document, SCRIPT_PLACEHOLDER};

use super::Context;

/// Name of the woven page of a tutorial.
pub fn tutorial_html_name(name: &str) -> String {
    format!("tutorial_{}.html", name)
}

/// Name of the tangled script of a tutorial.
pub fn tutorial_js_name(name: &str) -> String {
    format!("tutorial_{}.js", name)
}

/// Name of the demo page of a tutorial.
pub fn demo_html_name(name: &str) -> String {
    format!("demo_{}.html", name)
}

/// Renders a tutorial into its HTML page.
pub fn weave_tutorial(ctx: &Context, name: &str) -> Result<String> {
    let markdown = read_to_string(&ctx.tutorial_path(name))?;
    let template = read_to_string(&ctx.resolve(&ctx.config.templates.tutorial))?;

    let markdown = if ctx.config.embed_demo {
        // The frame is a raw HTML block; a blank line ends it.
        let mut prefixed = demo_frame(name);
        prefixed.push('\n');
        if ctx.config.wants_preamble(name) {
            prefixed.push_str(ctx.config.tutorial_preamble.trim_end());
            prefixed.push_str("\n\n");
        }
        prefixed.push_str(&markdown);
        prefixed
    } else {
        markdown
    };

    Ok(weave_document(&markdown, &template, &ctx.highlighter()))
}

/// Assembles and beautifies the script of a tutorial.
pub fn tangle_tutorial(ctx: &Context, name: &str) -> Result<String> {
    let path = ctx.tutorial_path(name);
    tangle_file(ctx, &path)
}

fn tangle_file(ctx: &Context, path: &Path) -> Result<String> {
    let tangle = &ctx.config.tangle;
    let fragments = read_tutorial_file(path, tangle)?;
    if fragments.root().is_none() {
        tracing::warn!(
            "{} has no '{}' fragment, the script will be empty",
            path.display(),
            tangle.root
        );
    }

    let placeholder = Placeholder::new(&tangle.placeholder)?;
    let tangled = tangle_fragments(&fragments, &placeholder, &tangle.root)?;
    for unused in &tangled.unused {
        tracing::warn!("{}: fragment '{}' is never used", path.display(), unused);
    }

    Ok(beautify(&tangled.text, &ctx.config.beautify))
}

/// Renders the page that hosts a tutorial's script.
pub fn demo_page(ctx: &Context, name: &str) -> Result<String> {
    let template = read_to_string(&ctx.resolve(&ctx.config.templates.demo))?;
    Ok(fill_template(&template, SCRIPT_PLACEHOLDER, &tutorial_js_name(name)))
}
