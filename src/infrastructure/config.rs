//! Configuration management
//!
//! An optional YAML file supplies the static parts of a run: exclusion
//! rules, recognized task types and the template depth bound.
//!
//! ```yaml
//! exclusions:
//!   commands:
//!     - Publish final artifacts
//!   templates:
//!     - templates/prep-android-nuget.yml
//! supported_tasks:
//!   - CmdLine@2
//! max_template_depth: 16
//! log_level: debug
//! ```

use crate::generator::{COMMAND_LINE_TASK, DEFAULT_MAX_TEMPLATE_DEPTH};
use crate::pipeline::ExclusionRules;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Commands and templates left out of the script
    pub exclusions: ExclusionRules,
    /// Task types emitted as shell commands
    pub supported_tasks: Vec<String>,
    /// Maximum template nesting
    pub max_template_depth: usize,
    /// Log level used when verbose output is requested
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclusions: ExclusionRules::default(),
            supported_tasks: vec![COMMAND_LINE_TASK.to_string()],
            max_template_depth: DEFAULT_MAX_TEMPLATE_DEPTH,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Reads a configuration file
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or contains unknown keys.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::from_yaml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parses configuration YAML; an empty document yields the defaults
    ///
    /// # Errors
    ///
    /// Fails on malformed YAML or unknown keys.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}
