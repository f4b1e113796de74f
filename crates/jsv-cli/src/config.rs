//! # CLI Configuration
//!
//! Optional YAML (or JSON) configuration file, overridden by command-line
//! flags:
//!
//! ```yaml
//! registry:
//!   schema_dir: schemas
//!   cache_dir: .jsv-cache
//!   use_cache: true
//! validator:
//!   allow_additional_fields: false
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jsv_schema::RegistryConfig;
use jsv_validate::ValidatorConfig;
use serde::{Deserialize, Serialize};

/// Settings shared by all subcommands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Where schemas are read from and cached.
    pub registry: RegistryConfig,
    /// Validation policy.
    pub validator: ValidatorConfig,
}

/// Command-line flags that take precedence over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub schema_dir: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
    pub no_cache: bool,
}

impl CliConfig {
    /// Read a configuration file. YAML is a superset of JSON, so both parse.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load `path` if given, otherwise start from defaults, then apply
    /// `overrides`.
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply(overrides);
        Ok(config)
    }

    /// Apply command-line overrides. A cache directory given on the command
    /// line turns caching on; `--no-cache` always wins.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(dir) = &overrides.schema_dir {
            self.registry.schema_dir = dir.clone();
        }
        if let Some(dir) = &overrides.cache_dir {
            self.registry.cache_dir = Some(dir.clone());
            self.registry.use_cache = true;
        }
        if overrides.no_cache {
            self.registry.use_cache = false;
        }
    }
}
