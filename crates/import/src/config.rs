use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::ledger::LedgerCsvProfile;

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Settings for a reconciliation run. Every key is optional:
///
/// ```toml
/// log_filter = "tally_match=debug"
///
/// [ledger]
/// has_header = true
/// delimiter = ";"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyConfig {
    pub log_filter: String,
    pub ledger: LedgerCsvProfile,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            ledger: LedgerCsvProfile::default(),
        }
    }
}

impl TallyConfig {
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}
