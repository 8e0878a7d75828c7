//! Execution context for weft operations.

use std::path::{Path, PathBuf};

use crate::config::{read_config, read_config_file, config_dir, resolve_against, Config};
use crate::errors::Result;
use crate::highlight::Highlighter;

/// Context for weft operations.
///
/// Tutorials, templates and materials are looked up relative to `base_dir`,
/// the directory holding the configuration file.
#[derive(Debug, Clone)]
pub struct Context {
    /// Configuration.
    pub config: Config,
    /// Base directory for operations.
    pub base_dir: PathBuf,
    /// Configuration file in use, if any.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Creates a new context with the given configuration.
    pub fn new(config: Config, base_dir: PathBuf) -> Self {
        Self {
            config,
            base_dir,
            config_path: None,
        }
    }

    /// Creates a context by searching for a configuration file from `dir` upward.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let (config, base_dir) = read_config(dir)?;
        let config_path = crate::config::find_config_file(dir);
        Ok(Self {
            config,
            base_dir,
            config_path,
        })
    }

    /// Creates a context from an explicit configuration file.
    pub fn from_config_file(path: &Path, fallback_dir: &Path) -> Result<Self> {
        let config = read_config_file(path)?;
        Ok(Self {
            config,
            base_dir: config_dir(path, fallback_dir),
            config_path: Some(path.to_path_buf()),
        })
    }

    /// Creates a context from the current directory.
    pub fn from_current_dir() -> Result<Self> {
        let dir = std::env::current_dir()?;
        Self::from_dir(&dir)
    }

    /// Resolves a path against the base directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        resolve_against(&self.base_dir, path)
    }

    /// Project root directory.
    pub fn root_dir(&self) -> PathBuf {
        self.resolve(&self.config.root_dir)
    }

    /// Directory receiving generated files.
    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.config.output_dir)
    }

    /// Directory holding prebuilt artifacts.
    pub fn build_dir(&self) -> PathBuf {
        resolve_against(&self.root_dir(), &self.config.build_dir)
    }

    /// Path of an output file.
    pub fn output_path(&self, name: impl AsRef<Path>) -> PathBuf {
        self.output_dir().join(name)
    }

    /// Markdown source of a tutorial.
    pub fn tutorial_path(&self, name: &str) -> PathBuf {
        self.resolve(&self.config.tutorial_source(name))
    }

    /// Source files scanned for the API reference.
    pub fn reference_sources(&self) -> Vec<PathBuf> {
        let root = self.root_dir();
        self.config
            .reference
            .sources
            .iter()
            .map(|p| resolve_against(&root, p))
            .collect()
    }

    /// Highlighter configured with the selected theme.
    pub fn highlighter(&self) -> Highlighter {
        Highlighter::new(self.config.highlight.style)
    }

    /// Files whose changes call for a rebuild.
    pub fn input_files(&self) -> Vec<PathBuf> {
        let templates = &self.config.templates;
        let mut files: Vec<PathBuf> = self
            .config
            .tutorials
            .iter()
            .map(|name| self.tutorial_path(name))
            .collect();
        files.push(self.resolve(&templates.tutorial));
        files.push(self.resolve(&templates.demo));
        files.push(self.resolve(&templates.reference));
        files.extend(
            self.config
                .materials
                .names
                .iter()
                .map(|name| self.resolve(Path::new(&format!("{}.mat", name)))),
        );
        files.extend(self.reference_sources());
        files.extend(self.config_path.iter().cloned());
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_directories() {
        let mut config = Config::default();
        config.root_dir = PathBuf::from("../..");
        let ctx = Context::new(config, PathBuf::from("/repo/docs/web"));

        assert_eq!(ctx.output_dir(), PathBuf::from("/repo/docs/web/out"));
        assert_eq!(ctx.root_dir(), PathBuf::from("/repo/docs/web/../.."));
        assert_eq!(
            ctx.build_dir(),
            PathBuf::from("/repo/docs/web/../../out/cmake-webgl-release")
        );
        assert_eq!(
            ctx.tutorial_path("triangle"),
            PathBuf::from("/repo/docs/web/tutorial_triangle.md")
        );
    }

    #[test]
    fn test_absolute_paths_kept() {
        let mut config = Config::default();
        config.output_dir = PathBuf::from("/var/www");
        let ctx = Context::new(config, PathBuf::from("/repo"));
        assert_eq!(ctx.output_path("reference.html"), PathBuf::from("/var/www/reference.html"));
    }

    #[test]
    fn test_from_dir_uses_config_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("weft.toml"), "output_dir = \"site\"\n").unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();

        let ctx = Context::from_dir(&nested).unwrap();
        assert_eq!(ctx.base_dir, dir.path());
        assert_eq!(ctx.output_dir(), dir.path().join("site"));
        assert_eq!(ctx.config_path, Some(dir.path().join("weft.toml")));
    }

    #[test]
    fn test_input_files() {
        let mut config = Config::default();
        config.tutorials = vec!["triangle".to_string()];
        config.materials.names = vec!["plastic".to_string()];
        config.reference.sources = vec![PathBuf::from("src/bindings.cpp")];
        let ctx = Context::new(config, PathBuf::from("/docs"));

        let files = ctx.input_files();
        assert!(files.contains(&PathBuf::from("/docs/tutorial_triangle.md")));
        assert!(files.contains(&PathBuf::from("/docs/tutorial_template.html")));
        assert!(files.contains(&PathBuf::from("/docs/plastic.mat")));
        assert!(files.contains(&PathBuf::from("/docs/./src/bindings.cpp")));
    }
}
