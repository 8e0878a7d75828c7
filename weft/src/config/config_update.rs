//! Configuration update and merging.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::config_data::{
    AssetsConfig, Config, HighlightConfig, MaterialsConfig, ReferenceConfig, ServerConfig,
    TangleConfig, TemplatesConfig, WatchConfig,
};
use crate::beautify::BeautifyOptions;
use crate::highlight::ThemeName;

/// Partial configuration update that can be merged into a Config.
///
/// All fields are optional. Only specified fields override the base config;
/// nested tables replace the base table as a whole.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub root_dir: Option<PathBuf>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub build_dir: Option<PathBuf>,
    #[serde(default)]
    pub tutorials: Option<Vec<String>>,
    #[serde(default)]
    pub embed_demo: Option<bool>,
    #[serde(default)]
    pub preamble_tutorial: Option<String>,
    #[serde(default)]
    pub tutorial_preamble: Option<String>,
    #[serde(default)]
    pub templates: Option<TemplatesConfig>,
    #[serde(default)]
    pub tangle: Option<TangleConfig>,
    #[serde(default)]
    pub beautify: Option<BeautifyOptions>,
    #[serde(default)]
    pub highlight: Option<HighlightConfig>,
    #[serde(default)]
    pub assets: Option<AssetsConfig>,
    #[serde(default)]
    pub materials: Option<MaterialsConfig>,
    #[serde(default)]
    pub reference: Option<ReferenceConfig>,
    #[serde(default)]
    pub server: Option<ServerConfig>,
    #[serde(default)]
    pub watch: Option<WatchConfig>,
}

impl ConfigUpdate {
    /// Creates an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the output directory.
    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = Some(dir);
        self
    }

    /// Overrides whether demos are embedded.
    pub fn with_embed_demo(mut self, embed: bool) -> Self {
        self.embed_demo = Some(embed);
        self
    }

    /// Overrides the highlight theme.
    pub fn with_style(mut self, style: ThemeName) -> Self {
        self.highlight = Some(HighlightConfig { style });
        self
    }

    /// Merges this update into a base configuration, returning a new Config.
    ///
    /// Consumes `self` so fields can be moved instead of cloned.
    pub fn merge_into(self, base: &Config) -> Config {
        Config {
            root_dir: self.root_dir.unwrap_or_else(|| base.root_dir.clone()),
            output_dir: self.output_dir.unwrap_or_else(|| base.output_dir.clone()),
            build_dir: self.build_dir.unwrap_or_else(|| base.build_dir.clone()),
            tutorials: self.tutorials.unwrap_or_else(|| base.tutorials.clone()),
            embed_demo: self.embed_demo.unwrap_or(base.embed_demo),
            preamble_tutorial: self
                .preamble_tutorial
                .or_else(|| base.preamble_tutorial.clone()),
            tutorial_preamble: self
                .tutorial_preamble
                .unwrap_or_else(|| base.tutorial_preamble.clone()),
            templates: self.templates.unwrap_or_else(|| base.templates.clone()),
            tangle: self.tangle.unwrap_or_else(|| base.tangle.clone()),
            beautify: self.beautify.unwrap_or_else(|| base.beautify.clone()),
            highlight: self.highlight.unwrap_or_else(|| base.highlight.clone()),
            assets: self.assets.unwrap_or_else(|| base.assets.clone()),
            materials: self.materials.unwrap_or_else(|| base.materials.clone()),
            reference: self.reference.unwrap_or_else(|| base.reference.clone()),
            server: self.server.unwrap_or_else(|| base.server.clone()),
            watch: self.watch.unwrap_or_else(|| base.watch.clone()),
        }
    }
}
