//! The full documentation build.

use std::path::{Path, PathBuf};

use crate::config::resolve_against;
use crate::errors::{Result, WeftError};
use crate::io::{RunTool, Transaction};

use super::reference::build_reference;
use super::tutorial::{
    demo_html_name, demo_page, tangle_tutorial, tutorial_html_name, tutorial_js_name,
    weave_tutorial,
};
use super::Context;

fn base_name(path: &Path) -> Result<&std::ffi::OsStr> {
    path.file_name()
        .ok_or_else(|| WeftError::Config(format!("asset path {} has no file name", path.display())))
}

/// Plans the copies of source and built assets into the output directory.
pub fn copy_assets(ctx: &Context) -> Result<Transaction> {
    let mut tx = Transaction::new();
    let root = ctx.root_dir();
    let build = ctx.build_dir();

    let sources = ctx.config.assets.sources.iter().map(|p| (&root, p));
    let built = ctx.config.assets.built.iter().map(|p| (&build, p));
    for (base, asset) in sources.chain(built) {
        let source = resolve_against(base, asset);
        let target = ctx.output_path(base_name(&source)?);
        tx.copy(source, target);
    }
    Ok(tx)
}

/// Plans one compiler run per configured material.
pub fn compile_materials(ctx: &Context) -> Transaction {
    let mut tx = Transaction::new();
    let materials = &ctx.config.materials;
    let compiler = resolve_against(&ctx.root_dir(), &materials.compiler);

    for name in &materials.names {
        let output = ctx.output_path(format!("{}.filamat", name));
        let input: PathBuf = ctx.resolve(Path::new(&format!("{}.mat", name)));

        let mut args = materials.flags.clone();
        args.push("-o".to_string());
        args.push(output.display().to_string());
        args.push(input.display().to_string());

        tx.run_tool(RunTool::new(&compiler, args, output).in_dir(&ctx.base_dir));
    }
    tx
}

/// Plans every output of the site.
///
/// Each tutorial contributes its page, script and demo page, in that order.
/// Assets, materials and the API reference follow.
pub fn build_all(ctx: &Context) -> Result<Transaction> {
    let mut tx = Transaction::new();

    for name in &ctx.config.tutorials {
        tracing::debug!("Building tutorial {}", name);
        tx.write(ctx.output_path(tutorial_html_name(name)), weave_tutorial(ctx, name)?);
        tx.write(ctx.output_path(tutorial_js_name(name)), tangle_tutorial(ctx, name)?);
        tx.write(ctx.output_path(demo_html_name(name)), demo_page(ctx, name)?);
    }

    tx.extend(copy_assets(ctx)?);
    tx.extend(compile_materials(ctx));

    if ctx.config.reference.is_enabled() {
        tx.write(
            ctx.output_path(&ctx.config.reference.output),
            build_reference(ctx)?,
        );
    } else {
        tracing::debug!("No reference sources configured, skipping reference");
    }

    Ok(tx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn project(config: Config) -> (TempDir, Context) {
        let dir = tempdir().unwrap();
        let p = dir.path();
        fs::write(
            p.join("tutorial_triangle.md"),
            "# Triangle\n\n```js {fragment=\"root\"}\nconst x=1;\n```\n",
        )
        .unwrap();
        fs::write(p.join("tutorial_template.html"), "$BODY").unwrap();
        fs::write(p.join("demo_template.html"), "$SCRIPT").unwrap();
        fs::write(p.join("ref_template.html"), "$BODY").unwrap();
        fs::write(p.join("bindings.cpp"), "/// Engine ::class:: The engine.\n").unwrap();
        fs::create_dir_all(p.join("web")).unwrap();
        fs::write(p.join("web").join("gl-matrix-min.js"), "// matrix").unwrap();
        fs::create_dir_all(p.join("out/cmake-webgl-release/web")).unwrap();
        fs::write(p.join("out/cmake-webgl-release/web/filament.wasm"), b"\0asm").unwrap();
        let ctx = Context::new(config, p.to_path_buf());
        (dir, ctx)
    }

    fn full_config() -> Config {
        let mut config = Config::default();
        config.output_dir = PathBuf::from("site");
        config.tutorials = vec!["triangle".to_string()];
        config.assets.sources = vec![PathBuf::from("web/gl-matrix-min.js")];
        config.assets.built = vec![PathBuf::from("web/filament.wasm")];
        config.materials.names = vec!["plastic".to_string()];
        config.reference.sources = vec![PathBuf::from("bindings.cpp")];
        config
    }

    #[test]
    fn test_build_all_order() {
        let (dir, ctx) = project(full_config());
        let tx = build_all(&ctx).unwrap();
        let site = dir.path().join("site");

        let targets: Vec<PathBuf> = tx.targets().into_iter().map(Path::to_path_buf).collect();
        assert_eq!(
            targets,
            vec![
                site.join("tutorial_triangle.html"),
                site.join("tutorial_triangle.js"),
                site.join("demo_triangle.html"),
                site.join("gl-matrix-min.js"),
                site.join("filament.wasm"),
                site.join("plastic.filamat"),
                site.join("reference.html"),
            ]
        );
    }

    #[test]
    fn test_material_command_line() {
        let (dir, ctx) = project(full_config());
        let tx = compile_materials(&ctx);
        let site = dir.path().join("site");

        assert_eq!(
            tx.describe(),
            vec![format!(
                "run {} -O -a opengl -p mobile -o {} {}",
                dir.path().join("./out/cmake-release/tools/matc/matc").display(),
                site.join("plastic.filamat").display(),
                dir.path().join("plastic.mat").display(),
            )]
        );
    }

    #[test]
    fn test_execute_writes_outputs() {
        let mut config = full_config();
        config.materials.names.clear();
        let (dir, ctx) = project(config);

        build_all(&ctx).unwrap().execute().unwrap();

        let site = dir.path().join("site");
        assert_eq!(
            fs::read_to_string(site.join("tutorial_triangle.js")).unwrap(),
            "const x = 1;\n"
        );
        assert_eq!(
            fs::read_to_string(site.join("demo_triangle.html")).unwrap(),
            "tutorial_triangle.js"
        );
        assert_eq!(fs::read(site.join("filament.wasm")).unwrap(), b"\0asm");
        assert!(fs::read_to_string(site.join("reference.html"))
            .unwrap()
            .contains("Engine"));
    }

    #[test]
    fn test_reference_skipped_without_sources() {
        let mut config = full_config();
        config.reference.sources.clear();
        let (_dir, ctx) = project(config);

        let tx = build_all(&ctx).unwrap();
        assert!(tx.targets().iter().all(|t| !t.ends_with("reference.html")));
    }

    #[test]
    fn test_missing_template_fails_before_any_write() {
        let (dir, ctx) = project(full_config());
        fs::remove_file(dir.path().join("demo_template.html")).unwrap();

        assert!(build_all(&ctx).is_err());
        assert!(!dir.path().join("site").exists());
    }
}
