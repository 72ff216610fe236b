use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::rules::RuleTable;

pub const DEFAULT_READ_LIMIT: usize = 1000;

/// What the organizer does when the destination already holds a file
/// with the same name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Leave the source where it is and report it.
    #[default]
    Skip,
    /// Move to `name (1).ext`, `name (2).ext`, ... whichever is free first.
    Rename,
    /// Replace the existing destination file.
    Overwrite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rules: RuleTable,
    pub read_limit: usize,
    pub on_conflict: ConflictPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules: RuleTable::default(),
            read_limit: DEFAULT_READ_LIMIT,
            on_conflict: ConflictPolicy::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.rules.validate().context("invalid rule table")?;
        anyhow::ensure!(self.read_limit > 0, "read_limit must be greater than zero");
        Ok(())
    }
}
