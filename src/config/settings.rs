use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ExtractError, Result};

/// Project-level configuration, loaded from `.vault-extract.toml`.
///
/// Every field has a sensible default so vault-extract works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Program invoked to decrypt the YAML file (default: `ansible`).
    #[serde(default = "default_ansible_bin")]
    pub ansible_bin: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_ansible_bin() -> String {
    "ansible".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            ansible_bin: default_ansible_bin(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".vault-extract.toml";

    /// Load settings from `<project_dir>/.vault-extract.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            ExtractError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        tracing::debug!(path = %config_path.display(), "loaded settings");
        Ok(settings)
    }

    /// Apply a command-line override for the ansible program, if given.
    pub fn with_ansible_bin(mut self, ansible_bin: Option<&str>) -> Self {
        if let Some(bin) = ansible_bin.filter(|b| !b.is_empty()) {
            self.ansible_bin = bin.to_string();
        }
        self
    }
}

// ── Tests ────────────────────────────────────────────────────────────
