//! Core [`RuleLoader`] struct: file-backed configuration loading.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::compiler::compile;
use crate::error::{Result, RuleError};
use crate::schema::RulesConfig;
use crate::store::RuleStore;

/// Loads the per-service rules file.
///
/// The file is a YAML mapping of service name to service configuration.
/// Loading is explicit; nothing watches the file for changes.
#[derive(Debug, Clone)]
pub struct RuleLoader {
    path: PathBuf,
}

impl RuleLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the configuration file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the configuration file.
    pub fn load(&self) -> Result<RulesConfig> {
        let contents = fs::read_to_string(&self.path).map_err(|source| RuleError::Io {
            path: self.path.clone(),
            source,
        })?;
        let config = Self::parse_str(&contents)?;
        info!(path = %self.path.display(), services = config.len(), "loaded rules configuration");
        Ok(config)
    }

    /// Parse YAML text into a configuration tree.
    ///
    /// An empty document yields an empty tree.
    pub fn parse_str(contents: &str) -> Result<RulesConfig> {
        if contents.trim().is_empty() {
            warn!("rules configuration is empty");
            return Ok(RulesConfig::new());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Load the file and compile it into a fresh store.
    pub fn compile(&self) -> Result<RuleStore> {
        compile(&self.load()?)
    }
}
