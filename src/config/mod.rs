use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Optional TOML config. Every field can also be set (and is overridden) by
/// the command line.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub data_path: Option<String>,
    pub logging_level: Option<String>,
    pub top_n: Option<usize>,
    pub recommend_limit: Option<usize>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
