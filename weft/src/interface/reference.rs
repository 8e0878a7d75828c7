//! API reference page.

use crate::errors::{read_to_string, Result};
use crate::model::DocEntity;
use crate::readers::read_docstrings;
use crate::reference::build_reference_markdown;
use crate::weave::weave_document;

use super::Context;

/// Scrapes the configured reference sources into a doc tree.
pub fn doc_tree(ctx: &Context) -> Result<Vec<DocEntity>> {
    let sources = ctx.reference_sources();
    let tree = read_docstrings(&sources)?;
    tracing::debug!(
        "Collected {} top-level entities from {} files",
        tree.len(),
        sources.len()
    );
    Ok(tree)
}

/// Renders the reference markdown of the configured sources.
pub fn reference_markdown(ctx: &Context) -> Result<String> {
    let tree = doc_tree(ctx)?;
    Ok(build_reference_markdown(&tree, &ctx.config.reference.preamble))
}

/// Renders the reference HTML page.
pub fn build_reference(ctx: &Context) -> Result<String> {
    let markdown = reference_markdown(ctx)?;
    let template = read_to_string(&ctx.resolve(&ctx.config.templates.reference))?;
    Ok(weave_document(&markdown, &template, &ctx.highlighter()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    const BINDINGS: &str = r#"
/// Engine ::core class:: Central rendering object.
class_<Engine>("Engine")
    /// create ::method static:: Creates an engine.
    /// canvas ::argument:: Target [Canvas].
    .class_function("create", &Engine::create)
/// Skybox ::class:: Background.
enum_<Fog>("Fog")
    .value("LINEAR", Fog::LINEAR)
"#;

    fn context(dir: &std::path::Path) -> Context {
        let mut config = Config::default();
        config.reference.sources = vec![PathBuf::from("jsbindings.cpp")];
        config.reference.preamble = "Everything lives in `Filament`.".to_string();
        Context::new(config, dir.to_path_buf())
    }

    #[test]
    fn test_doc_tree() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("jsbindings.cpp"), BINDINGS).unwrap();

        let tree = doc_tree(&context(dir.path())).unwrap();
        let names: Vec<&str> = tree.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Engine", "Skybox", "Fog"]);
        assert_eq!(tree[0].children[0].name, "create");
        assert_eq!(tree[2].children[0].name, "LINEAR");
    }

    #[test]
    fn test_build_reference() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("jsbindings.cpp"), BINDINGS).unwrap();
        fs::write(dir.path().join("ref_template.html"), "<main>$BODY</main>").unwrap();

        let page = build_reference(&context(dir.path())).unwrap();
        assert!(page.starts_with("<main><p>Everything lives in <code>Filament</code>.</p>"));
        assert!(page.contains("<h3>Classes</h3>"));
        assert!(page.contains("<a id='Engine' href='#Engine'>Engine</a>"));
        assert!(page.contains("<a href=\"#Canvas\">Canvas</a>"));
        assert!(page.contains("<div class='enumdoc'>"));
        assert!(page.ends_with("</main>"));
    }

    #[test]
    fn test_missing_source_is_an_error() {
        let dir = tempdir().unwrap();
        let err = doc_tree(&context(dir.path())).unwrap_err();
        assert!(err.to_string().contains("jsbindings.cpp"));
    }
}
