use crate::platform::{Platform, Sources};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Overrides for the files the queries read. Unset = platform default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount_table: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fstab:       Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diskstats:   Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// tracing filter used when RUST_LOG is unset ("warn", "nixfs=debug")
    pub log_level:      String,
    /// Print sizes as "12.5 GB" rather than raw byte counts
    pub human_readable: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { log_level: "warn".into(), human_readable: true }
    }
}

impl SourcesConfig {
    /// Apply overrides on top of the platform defaults.
    pub fn resolve(&self, platform: &dyn Platform) -> Sources {
        let defaults = platform.default_sources();
        Sources {
            mount_table: self.mount_table.clone().unwrap_or(defaults.mount_table),
            fstab:       self.fstab.clone().unwrap_or(defaults.fstab),
            diskstats:   self.diskstats.clone().unwrap_or(defaults.diskstats),
        }
    }
}

// ── Load ──────────────────────────────────────────────────────────────

impl Config {
    /// Load the user config; a missing or malformed file gives defaults.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path).unwrap_or_default(),
            None       => Config::default(),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("nixfs").join("nixfs.toml"))
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
