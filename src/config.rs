use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Defaults read from the [tool.py-license-lister] section of
/// pyproject.toml. Every field is optional; CLI arguments override any
/// value set here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Output format style
    pub format: Option<String>,

    /// License information source ("meta", "classifier", "mixed", "all")
    pub from: Option<String>,

    /// Sort column
    pub order: Option<String>,

    /// Dump with system packages
    pub with_system: Option<bool>,

    /// Package names excluded from the dump
    pub ignore_packages: Option<Vec<String>>,

    /// Dump the per-license summary instead of the package list
    pub summary: Option<bool>,
}

/// Load configuration from pyproject.toml in the current directory.
pub fn load_config() -> Result<Config> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| Path::new(".").to_path_buf());
    load_config_from(&current_dir)
}

/// Load configuration from pyproject.toml under the given directory.
pub fn load_config_from(dir: &Path) -> Result<Config> {
    let pyproject_path = dir.join("pyproject.toml");

    if !pyproject_path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&pyproject_path)
        .with_context(|| format!("Failed to read pyproject.toml: {}", pyproject_path.display()))?;

    let pyproject: toml::Value = toml::from_str(&content)
        .with_context(|| format!("Failed to parse pyproject.toml: {}", pyproject_path.display()))?;

    // Extract [tool.py-license-lister] section
    if let Some(tool) = pyproject.get("tool") {
        if let Some(section) = tool.get("py-license-lister") {
            let config: Config = section
                .clone()
                .try_into()
                .context("Failed to parse [tool.py-license-lister] section")?;
            return Ok(config);
        }
    }

    Ok(Config::default())
}
