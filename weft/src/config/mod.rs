//! Configuration loading and management.

mod config_data;
mod config_update;

use std::path::{Path, PathBuf};

pub use config_data::{
    resolve_against, AssetsConfig, Config, HighlightConfig, MaterialsConfig, ReferenceConfig,
    ServerConfig, TangleConfig, TemplatesConfig, WatchConfig, DEFAULT_TUTORIAL_PREAMBLE,
};
pub use config_update::ConfigUpdate;

use crate::errors::{read_to_string, Result};

/// Standard configuration file names to search for.
const CONFIG_FILES: &[&str] = &["weft.toml", ".weft.toml"];

/// Finds the configuration file in the given directory or its parents.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for name in CONFIG_FILES {
            let candidate = current.join(name);
            if candidate.exists() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Reads configuration from a TOML file.
pub fn read_config_file(path: &Path) -> Result<Config> {
    let content = read_to_string(path)?;
    let update: ConfigUpdate = toml::from_str(&content)?;
    tracing::debug!("Loaded configuration from {}", path.display());
    Ok(update.merge_into(&Config::default()))
}

/// Reads configuration, searching from the given directory.
///
/// Returns the configuration together with the directory its relative
/// paths are resolved against: the directory holding the file, or
/// `start_dir` when no file was found and defaults are used.
pub fn read_config(start_dir: &Path) -> Result<(Config, PathBuf)> {
    match find_config_file(start_dir) {
        Some(path) => {
            let config = read_config_file(&path)?;
            let dir = config_dir(&path, start_dir);
            Ok((config, dir))
        }
        None => Ok((Config::default(), start_dir.to_path_buf())),
    }
}

/// Directory a configuration file's relative paths are resolved against.
pub fn config_dir(config_path: &Path, fallback: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => fallback.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("weft.toml");
        fs::write(&config_path, "tutorials = []").unwrap();

        let found = find_config_file(dir.path()).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_find_config_file_parent() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(".weft.toml");
        fs::write(&config_path, "tutorials = []").unwrap();

        let subdir = dir.path().join("docs");
        fs::create_dir(&subdir).unwrap();

        let found = find_config_file(&subdir).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_read_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("weft.toml");
        fs::write(
            &config_path,
            r#"
root_dir = "../.."
output_dir = "site"
tutorials = ["triangle", "redball"]

[reference]
sources = ["libs/bindings.cpp"]
preamble = "All names live in the Filament namespace."
"#,
        )
        .unwrap();

        let config = read_config_file(&config_path).unwrap();
        assert_eq!(config.root_dir, PathBuf::from("../.."));
        assert_eq!(config.output_dir, PathBuf::from("site"));
        assert_eq!(config.tutorials, vec!["triangle", "redball"]);
        assert!(config.reference.is_enabled());
        assert_eq!(config.reference.output, PathBuf::from("reference.html"));
    }

    #[test]
    fn test_read_config_reports_toml_errors() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("weft.toml"), "tutorials = [").unwrap();
        assert!(read_config(dir.path()).is_err());
    }

    #[test]
    fn test_read_config_default() {
        let dir = tempdir().unwrap();
        let (config, base) = read_config(dir.path()).unwrap();
        assert!(config.tutorials.is_empty());
        assert_eq!(base, dir.path());
    }

    #[test]
    fn test_read_config_base_is_config_dir() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("weft.toml"), "embed_demo = false").unwrap();
        let subdir = dir.path().join("nested");
        fs::create_dir(&subdir).unwrap();

        let (config, base) = read_config(&subdir).unwrap();
        assert!(!config.embed_demo);
        assert_eq!(base, dir.path());
    }
}
