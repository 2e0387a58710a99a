//! Rule set loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading rule sets
//! from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    MinimumWageConfig, MinimumWageTable, RuleSet, RuleSetConfig, WithholdingConfig,
    WithholdingTable,
};

/// Loads and provides access to a rule set version.
///
/// # Directory Structure
///
/// ```text
/// config/clt-2025/
/// ├── ruleset.yaml       # Metadata, notice rules, fund rates
/// ├── minimum_wage.yaml  # Minimum wage history
/// └── withholding.yaml   # Social-security brackets
/// ```
///
/// # Example
///
/// ```no_run
/// use settlement_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/clt-2025")?;
/// println!("Rule set: {}", loader.rules().metadata().name);
/// # Ok::<(), settlement_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    rules: RuleSet,
}

impl ConfigLoader {
    /// Loads a rule set from the specified directory.
    ///
    /// Returns an error if any file is missing, contains invalid YAML, or
    /// describes an inconsistent table.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let ruleset = Self::load_yaml::<RuleSetConfig>(&path.join("ruleset.yaml"))?;
        let minimum_wage = Self::load_yaml::<MinimumWageConfig>(&path.join("minimum_wage.yaml"))?;
        let withholding = Self::load_yaml::<WithholdingConfig>(&path.join("withholding.yaml"))?;

        let rules = RuleSet::new(
            ruleset.metadata,
            MinimumWageTable::new(minimum_wage.records)?,
            WithholdingTable::new(withholding.effective_date, withholding.brackets)?,
            ruleset.notice,
            ruleset.fund,
        );

        tracing::debug!(
            path = %path.display(),
            code = %rules.metadata().code,
            "Loaded rule set"
        );

        Ok(Self { rules })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded rule set.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Consumes the loader, returning the rule set.
    pub fn into_rules(self) -> RuleSet {
        self.rules
    }
}
