//! User settings for ZenSplit
//!
//! Settings live in `config.json` in the base directory. Every field has a
//! default, so older or partial files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::ZenSplitPaths;
use crate::error::ZenSplitError;
use crate::models::{Money, ParticipantId};
use crate::services::{BalanceLedger, SettlementPlanner, SplitAllocator};

/// User settings for ZenSplit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when rendering amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Tolerance below which an amount counts as zero, in cents
    #[serde(default = "default_epsilon")]
    pub epsilon: Money,

    /// Who "me" is when no `--me` flag is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_identity: Option<ParticipantId>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_epsilon() -> Money {
    Money::CENT
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            epsilon: default_epsilon(),
            default_identity: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &ZenSplitPaths) -> Result<Self, ZenSplitError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| ZenSplitError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| ZenSplitError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ZenSplitPaths) -> Result<(), ZenSplitError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ZenSplitError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ZenSplitError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject settings the engine cannot work with
    pub fn validate(&self) -> Result<(), ZenSplitError> {
        if !self.epsilon.is_positive() {
            return Err(ZenSplitError::Config(format!(
                "epsilon must be at least one cent, got {}",
                self.epsilon.cents()
            )));
        }
        Ok(())
    }

    pub fn allocator(&self) -> SplitAllocator {
        SplitAllocator::new(self.epsilon)
    }

    pub fn ledger(&self) -> BalanceLedger {
        BalanceLedger::new(self.epsilon)
    }

    pub fn planner(&self) -> SettlementPlanner {
        SettlementPlanner::new(self.epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.epsilon, Money::CENT);
        assert_eq!(settings.currency_symbol, "₹");
        assert!(settings.default_identity.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ZenSplitPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            currency_symbol: "$".into(),
            epsilon: Money::from_cents(5),
            default_identity: ParticipantId::new("alice@example.com"),
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "$");
        assert_eq!(loaded.epsilon, Money::from_cents(5));
        assert_eq!(loaded.default_identity, ParticipantId::new("alice@example.com"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ZenSplitPaths::with_base_dir(temp_dir.path().to_path_buf());
        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.schema_version, 1);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ZenSplitPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"currency_symbol": "€"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.epsilon, Money::CENT);
    }

    #[test]
    fn test_zero_epsilon_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ZenSplitPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"epsilon": 0}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, ZenSplitError::Config(_)));
    }
}
