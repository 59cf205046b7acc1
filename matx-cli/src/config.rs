//! Matx configuration
//!
//! Handles parsing of the optional `matx.toml` file that picks the
//! register layout.

use matx_core::{MatxError, RegisterProfile, RegisterSet};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Invalid register set: {0}")]
    InvalidRegisters(#[from] MatxError),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Root structure of matx.toml, before the register table is checked.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    profile: Option<RegisterProfile>,

    #[serde(default)]
    registers: Option<RegistersTable>,
}

/// `[registers]` table
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistersTable {
    names: Vec<char>,
    #[serde(default)]
    identity: Option<char>,
}

/// Validated configuration.
#[derive(Debug, Clone, Default)]
pub struct MatxConfig {
    /// Built-in register layout
    pub profile: Option<RegisterProfile>,

    /// Explicit register names; wins over `profile`
    pub registers: Option<RegisterSet>,
}

impl MatxConfig {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        let raw: RawConfig = toml::from_str(content)?;
        let registers = raw
            .registers
            .map(|table| RegisterSet::new(table.names, table.identity))
            .transpose()?;
        Ok(Self {
            profile: raw.profile,
            registers,
        })
    }

    /// Register set to run with.
    ///
    /// A profile chosen on the command line wins, then `[registers]`, then
    /// the file's `profile`, then the full layout.
    pub fn register_set(&self, cli_profile: Option<RegisterProfile>) -> RegisterSet {
        if let Some(profile) = cli_profile {
            return profile.register_set();
        }
        if let Some(set) = &self.registers {
            return set.clone();
        }
        self.profile.unwrap_or_default().register_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_full_profile() {
        let config = MatxConfig::from_toml("").unwrap();
        let set = config.register_set(None);
        assert_eq!(set.storable(), &['A', 'B', 'C', 'D']);
        assert_eq!(set.identity(), Some('I'));
    }

    #[test]
    fn test_profile_from_file() {
        let config = MatxConfig::from_toml(r#"profile = "basic""#).unwrap();
        assert_eq!(config.register_set(None), RegisterProfile::Basic.register_set());
    }

    #[test]
    fn test_registers_table_overrides_profile() {
        let config = MatxConfig::from_toml(
            r#"
            profile = "basic"

            [registers]
            names = ["X", "Y"]
            identity = "E"
            "#,
        )
        .unwrap();
        let set = config.register_set(None);
        assert_eq!(set.storable(), &['X', 'Y']);
        assert_eq!(set.identity(), Some('E'));
    }

    #[test]
    fn test_cli_profile_wins() {
        let config = MatxConfig::from_toml(
            r#"
            [registers]
            names = ["X"]
            "#,
        )
        .unwrap();
        let set = config.register_set(Some(RegisterProfile::Full));
        assert_eq!(set, RegisterProfile::Full.register_set());
    }

    #[test]
    fn test_invalid_register_table_rejected() {
        let err = MatxConfig::from_toml(
            r#"
            [registers]
            names = ["A", "A"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRegisters(_)));
        assert!(err.to_string().starts_with("Invalid register set: "));

        let err = MatxConfig::from_toml(
            r#"
            [registers]
            names = ["A"]
            identity = "A"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRegisters(_)));

        let err = MatxConfig::from_toml(r#"profile = "huge""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(MatxConfig::from_toml(r#"colour = "red""#).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = MatxConfig::load(Path::new("/nonexistent/matx.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
