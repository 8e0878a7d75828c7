//! Configuration data structures.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::beautify::BeautifyOptions;
use crate::errors::{Result, WeftError};
use crate::highlight::ThemeName;

/// Preamble woven into the first tutorial when the demo is embedded.
pub const DEFAULT_TUTORIAL_PREAMBLE: &str = "
## Literate programming

The markdown source for this tutorial is not only used to generate this
web page, it's also used to generate the JavaScript for the above demo.
We use a small tool for weaving (generating HTML) and tangling
(generating JS). In the code samples, you'll often see
`// TODO: <some task>`. These are special markers that get replaced by
subsequent code blocks.
";

/// Main configuration structure for weft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Project root; asset and reference sources are relative to it.
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Directory receiving all generated files.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Directory holding prebuilt artifacts, relative to `root_dir`.
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,

    /// Tutorial names; `NAME` is read from `tutorial_NAME.md`.
    #[serde(default)]
    pub tutorials: Vec<String>,

    /// Whether tutorial pages embed their live demo.
    #[serde(default = "default_true")]
    pub embed_demo: bool,

    /// Tutorial that receives the literate programming preamble.
    #[serde(default = "default_preamble_tutorial")]
    pub preamble_tutorial: Option<String>,

    /// Markdown prepended to `preamble_tutorial`.
    #[serde(default = "default_tutorial_preamble")]
    pub tutorial_preamble: String,

    /// HTML templates.
    #[serde(default)]
    pub templates: TemplatesConfig,

    /// Tangle settings.
    #[serde(default)]
    pub tangle: TangleConfig,

    /// Formatting applied to tangled JavaScript.
    #[serde(default)]
    pub beautify: BeautifyOptions,

    /// Syntax highlighting settings.
    #[serde(default)]
    pub highlight: HighlightConfig,

    /// Files copied verbatim into the output directory.
    #[serde(default)]
    pub assets: AssetsConfig,

    /// Material compilation.
    #[serde(default)]
    pub materials: MaterialsConfig,

    /// API reference generation.
    #[serde(default)]
    pub reference: ReferenceConfig,

    /// Preview server.
    #[serde(default)]
    pub server: ServerConfig,

    /// Watch mode.
    #[serde(default)]
    pub watch: WatchConfig,
}

fn default_root_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("out/cmake-webgl-release")
}

fn default_true() -> bool {
    true
}

fn default_preamble_tutorial() -> Option<String> {
    Some("triangle".to_string())
}

fn default_tutorial_preamble() -> String {
    DEFAULT_TUTORIAL_PREAMBLE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            output_dir: default_output_dir(),
            build_dir: default_build_dir(),
            tutorials: Vec::new(),
            embed_demo: true,
            preamble_tutorial: default_preamble_tutorial(),
            tutorial_preamble: default_tutorial_preamble(),
            templates: TemplatesConfig::default(),
            tangle: TangleConfig::default(),
            beautify: BeautifyOptions::default(),
            highlight: HighlightConfig::default(),
            assets: AssetsConfig::default(),
            materials: MaterialsConfig::default(),
            reference: ReferenceConfig::default(),
            server: ServerConfig::default(),
            watch: WatchConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Markdown source of a tutorial.
    pub fn tutorial_source(&self, name: &str) -> PathBuf {
        PathBuf::from(format!("tutorial_{}.md", name))
    }

    /// Returns true if `name` receives the literate programming preamble.
    pub fn wants_preamble(&self, name: &str) -> bool {
        self.preamble_tutorial.as_deref() == Some(name)
    }
}

/// Template file locations, relative to the configuration directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    #[serde(default = "default_tutorial_template")]
    pub tutorial: PathBuf,
    #[serde(default = "default_demo_template")]
    pub demo: PathBuf,
    #[serde(default = "default_reference_template")]
    pub reference: PathBuf,
}

fn default_tutorial_template() -> PathBuf {
    PathBuf::from("tutorial_template.html")
}

fn default_demo_template() -> PathBuf {
    PathBuf::from("demo_template.html")
}

fn default_reference_template() -> PathBuf {
    PathBuf::from("ref_template.html")
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            tutorial: default_tutorial_template(),
            demo: default_demo_template(),
            reference: default_reference_template(),
        }
    }
}

/// Tangle configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TangleConfig {
    /// Fence language that participates in tangling.
    #[serde(default = "default_tangle_language")]
    pub language: String,

    /// Comment prefix marking a placeholder line.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Fragment name of the output skeleton.
    #[serde(default = "default_root_fragment")]
    pub root: String,
}

fn default_tangle_language() -> String {
    "js".to_string()
}

fn default_placeholder() -> String {
    "// TODO:".to_string()
}

fn default_root_fragment() -> String {
    "root".to_string()
}

impl Default for TangleConfig {
    fn default() -> Self {
        Self {
            language: default_tangle_language(),
            placeholder: default_placeholder(),
            root: default_root_fragment(),
        }
    }
}

/// Highlighting configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighlightConfig {
    /// Color theme for code blocks.
    #[serde(default)]
    pub style: ThemeName,
}

/// Assets copied into the output directory under their base names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Paths relative to `root_dir`.
    #[serde(default)]
    pub sources: Vec<PathBuf>,

    /// Paths relative to `build_dir`.
    #[serde(default)]
    pub built: Vec<PathBuf>,
}

/// Material compiler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialsConfig {
    /// Compiler executable, relative to `root_dir` unless absolute.
    #[serde(default = "default_compiler")]
    pub compiler: PathBuf,

    /// Flags passed before `-o`.
    #[serde(default = "default_material_flags")]
    pub flags: Vec<String>,

    /// Material names; `NAME.mat` compiles to `NAME.filamat`.
    #[serde(default)]
    pub names: Vec<String>,
}

fn default_compiler() -> PathBuf {
    PathBuf::from("out/cmake-release/tools/matc/matc")
}

fn default_material_flags() -> Vec<String> {
    ["-O", "-a", "opengl", "-p", "mobile"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for MaterialsConfig {
    fn default() -> Self {
        Self {
            compiler: default_compiler(),
            flags: default_material_flags(),
            names: Vec::new(),
        }
    }
}

/// API reference configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceConfig {
    /// Source files scanned for `///` doc comments, relative to `root_dir`.
    #[serde(default)]
    pub sources: Vec<PathBuf>,

    /// Paragraph placed above the table of contents.
    #[serde(default)]
    pub preamble: String,

    /// Output file name.
    #[serde(default = "default_reference_output")]
    pub output: PathBuf,
}

fn default_reference_output() -> PathBuf {
    PathBuf::from("reference.html")
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            preamble: String::new(),
            output: default_reference_output(),
        }
    }
}

impl ReferenceConfig {
    /// Returns true if there is anything to scan.
    pub fn is_enabled(&self) -> bool {
        !self.sources.is_empty()
    }
}

/// Preview server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    /// Extension (without dot) to MIME type overrides.
    #[serde(default = "default_mime_types")]
    pub mime_types: IndexMap<String, String>,
}

fn default_port() -> u16 {
    8000
}

fn default_mime_types() -> IndexMap<String, String> {
    let mut types = IndexMap::new();
    types.insert("wasm".to_string(), "application/wasm".to_string());
    types
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            mime_types: default_mime_types(),
        }
    }
}

/// Watch mode configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Debounce delay in milliseconds.
    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,

    /// Patterns (relative to the configuration directory) that never trigger a rebuild.
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_debounce() -> u64 {
    100
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce(),
            exclude: Vec::new(),
        }
    }
}

impl WatchConfig {
    /// Compiles the exclude patterns.
    pub fn exclude_patterns(&self) -> Result<Vec<glob::Pattern>> {
        self.exclude
            .iter()
            .map(|p| glob::Pattern::new(p).map_err(WeftError::from))
            .collect()
    }
}

/// Resolves `path` against `base` unless it is already absolute.
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
