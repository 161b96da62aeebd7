//! Engine policy configuration.

use serde::Deserialize;
use thiserror::Error;

/// Default registry capacity.
pub const DEFAULT_MAX_CELLS: usize = 50_000;

/// What `create_value_cell` does when the name is already taken.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedefinitionPolicy {
    /// Overwrite the value and report an advisory `DuplicateCellName`.
    #[default]
    Overwrite,
    /// Leave the cell untouched and fail with `DuplicateCellName`.
    Reject,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub redefinition: RedefinitionPolicy,
    /// Accept NaN and infinities in cell writes.
    pub allow_non_finite: bool,
    pub max_cells: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            redefinition: RedefinitionPolicy::Overwrite,
            allow_non_finite: false,
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_cells must be at least 1")]
    ZeroCapacity,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_cells == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_policy() {
        let config = EngineConfig::default();
        assert_eq!(config.redefinition, RedefinitionPolicy::Overwrite);
        assert!(!config.allow_non_finite);
        assert_eq!(config.max_cells, DEFAULT_MAX_CELLS);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn zero_capacity_is_invalid() {
        let config = EngineConfig {
            max_cells: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCapacity));
    }

    #[test]
    fn deserializes_partial_tables() {
        let config: EngineConfig = toml::from_str("redefinition = \"reject\"").unwrap();
        assert_eq!(config.redefinition, RedefinitionPolicy::Reject);
        assert_eq!(config.max_cells, DEFAULT_MAX_CELLS);

        let config: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(toml::from_str::<EngineConfig>("sticky_errors = true").is_err());
        assert!(toml::from_str::<EngineConfig>("redefinition = \"merge\"").is_err());
    }
}
