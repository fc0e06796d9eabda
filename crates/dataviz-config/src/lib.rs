//! Configuration management and loading for dataviz.

use anyhow::Context;
use dataviz_graph::RenderOptions;
use dataviz_logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Configuration format types supported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    Json,
    #[default]
    Yaml,
}

impl ConfigFormat {
    /// Picks the format from a file extension; anything other than `.json`
    /// is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// Structures the CLI knows how to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StructureKind {
    #[default]
    Avl,
    RedBlack,
    TreeMap,
    Heap,
}

impl StructureKind {
    pub const ALL: [StructureKind; 4] = [
        StructureKind::Avl,
        StructureKind::RedBlack,
        StructureKind::TreeMap,
        StructureKind::Heap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StructureKind::Avl => "avl",
            StructureKind::RedBlack => "red-black",
            StructureKind::TreeMap => "tree-map",
            StructureKind::Heap => "heap",
        }
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StructureKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StructureKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown structure: {}", s))
    }
}

/// Main dataviz configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatavizConfig {
    /// Directory relative image paths are written into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// How Graphviz is invoked for image output
    #[serde(default)]
    pub render: RenderOptions,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Structure built when the command line does not name one
    #[serde(default)]
    pub default_structure: StructureKind,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for DatavizConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            render: RenderOptions::default(),
            logging: LoggingConfig::default(),
            default_structure: StructureKind::default(),
        }
    }
}

impl DatavizConfig {
    /// Resolves an image path against `output_dir` unless it is absolute.
    pub fn output_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.output_dir.join(path)
        }
    }
}

/// Load configuration from a file
pub fn load_config<P: AsRef<Path>>(path: P) -> anyhow::Result<DatavizConfig> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;

    match ConfigFormat::from_path(path) {
        ConfigFormat::Json => serde_json::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse JSON config: {}", e)),
        ConfigFormat::Yaml => serde_yaml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse YAML config: {}", e)),
    }
}

/// Save configuration to a file
pub fn save_config<P: AsRef<Path>>(config: &DatavizConfig, path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    let contents = match ConfigFormat::from_path(path) {
        ConfigFormat::Json => serde_json::to_string_pretty(config)
            .map_err(|e| anyhow::anyhow!("Failed to serialize JSON config: {}", e))?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)
            .map_err(|e| anyhow::anyhow!("Failed to serialize YAML config: {}", e))?,
    };

    std::fs::write(path, contents)
        .with_context(|| format!("failed to write config {}", path.display()))?;
    Ok(())
}
