//! Reference command implementation.

use weft::errors::{Result, WeftError};
use weft::interface::{build_reference, doc_tree, Context};
use weft::io::Transaction;

/// Options for the reference command.
#[derive(Debug, Clone, Default)]
pub struct ReferenceOptions {
    /// Dump the doc tree as JSON instead of building the page.
    pub json: bool,
}

/// Executes the reference command.
pub fn reference(ctx: &Context, options: ReferenceOptions) -> Result<()> {
    if !ctx.config.reference.is_enabled() {
        return Err(WeftError::Config(
            "no reference sources configured under [reference]".to_string(),
        ));
    }

    if options.json {
        let tree = doc_tree(ctx)?;
        println!("{}", serde_json::to_string_pretty(&tree)?);
        return Ok(());
    }

    let mut transaction = Transaction::new();
    transaction.write(
        ctx.output_path(&ctx.config.reference.output),
        build_reference(ctx)?,
    );
    transaction.execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;
    use weft::Config;

    #[test]
    fn test_reference_writes_page() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("bindings.cpp"),
            "/// Engine ::class:: The engine.\n/// create ::method static:: Makes one.\n",
        )
        .unwrap();
        fs::write(dir.path().join("ref_template.html"), "<main>$BODY</main>").unwrap();

        let mut config = Config::default();
        config.reference.sources = vec![PathBuf::from("bindings.cpp")];
        let ctx = Context::new(config, dir.path().to_path_buf());

        reference(&ctx, ReferenceOptions::default()).unwrap();

        let page = fs::read_to_string(dir.path().join("out/reference.html")).unwrap();
        assert!(page.contains("<strong>Engine.create()</strong>"));
    }

    #[test]
    fn test_reference_json_writes_nothing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bindings.cpp"), "/// f ::function:: F.\n").unwrap();

        let mut config = Config::default();
        config.reference.sources = vec![PathBuf::from("bindings.cpp")];
        let ctx = Context::new(config, dir.path().to_path_buf());

        reference(&ctx, ReferenceOptions { json: true }).unwrap();
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_reference_requires_sources() {
        let dir = tempdir().unwrap();
        let ctx = Context::new(Config::default(), dir.path().to_path_buf());
        assert!(matches!(
            reference(&ctx, ReferenceOptions::default()),
            Err(WeftError::Config(_))
        ));
    }
}
