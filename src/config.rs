//! Optional `config.toml` inside the data directory
//!
//! Every field is optional; anything left out falls back to a default.
//! Values that cannot be used are replaced by their default and reported as
//! warnings, so a typo never keeps the list from opening.

use crate::persistence::storage::is_valid_key;
use crate::persistence::{DEFAULT_QUOTA_BYTES, DEFAULT_SLOT};
use serde::Deserialize;
use simplelog::LevelFilter;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Default, Deserialize)]
pub struct TicklistConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct StorageConfig {
    /// Slot holding the list
    pub slot: Option<String>,
    /// Largest slot the file storage accepts, in bytes
    pub max_bytes: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogConfig {
    /// off, error, warn, info, debug or trace
    pub level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UiConfig {
    /// Unicode checkboxes instead of ASCII ones
    pub use_unicode: Option<bool>,
}

/// Concrete settings after defaults have been applied
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub slot: String,
    pub max_bytes: usize,
    pub log_level: LevelFilter,
    pub use_unicode: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            slot: DEFAULT_SLOT.to_string(),
            max_bytes: DEFAULT_QUOTA_BYTES,
            log_level: LevelFilter::Info,
            use_unicode: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Written by `ticklist init` so the options are discoverable
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# ticklist configuration. Every setting is optional.

[storage]
# Name of the slot holding the list (file: <slot>.json)
# slot = "todoList"
# Largest slot accepted, in bytes
# max_bytes = 5242880

[log]
# off | error | warn | info | debug | trace
# level = "info"

[ui]
# Use ✔/· checkboxes; set to false for [x]/[ ]
# use_unicode = true
"#;

/// Read a config file; a missing file is an empty config
pub fn load_config(path: &Path) -> Result<TicklistConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(TicklistConfig::default()),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl TicklistConfig {
    /// Apply defaults, returning the settings and any warnings about values
    /// that had to be ignored
    pub fn resolve(&self) -> (ResolvedConfig, Vec<String>) {
        let defaults = ResolvedConfig::default();
        let mut warnings = Vec::new();

        let slot = match self.storage.slot.as_deref().map(str::trim) {
            None => defaults.slot,
            Some(slot) if is_valid_key(slot) => slot.to_string(),
            Some(slot) => {
                warnings.push(format!(
                    "storage.slot {:?} is not a valid slot name, using {:?}",
                    slot, defaults.slot
                ));
                defaults.slot
            }
        };

        let max_bytes = match self.storage.max_bytes {
            None => defaults.max_bytes,
            Some(0) => {
                warnings.push(format!(
                    "storage.max_bytes must be positive, using {}",
                    defaults.max_bytes
                ));
                defaults.max_bytes
            }
            Some(bytes) => bytes,
        };

        let log_level = match self.log.level.as_deref() {
            None => defaults.log_level,
            Some(level) => LevelFilter::from_str(level.trim()).unwrap_or_else(|_| {
                warnings.push(format!(
                    "log.level {:?} is not a log level, using {}",
                    level, defaults.log_level
                ));
                defaults.log_level
            }),
        };

        let use_unicode = self.ui.use_unicode.unwrap_or(defaults.use_unicode);

        (
            ResolvedConfig {
                slot,
                max_bytes,
                log_level,
                use_unicode,
            },
            warnings,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_is_default() {
        let temp_dir = tempdir().unwrap();
        let config = load_config(&temp_dir.path().join("config.toml")).unwrap();

        let (resolved, warnings) = config.resolve();
        assert_eq!(resolved, ResolvedConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[log]\nlevel = \"debug\"\n").unwrap();

        let (resolved, warnings) = load_config(&path).unwrap().resolve();
        assert_eq!(resolved.log_level, LevelFilter::Debug);
        assert_eq!(resolved.slot, DEFAULT_SLOT);
        assert!(resolved.use_unicode);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_full_config() {
        let config: TicklistConfig = toml::from_str(
            r#"
            [storage]
            slot = "groceries"
            max_bytes = 2048
            [log]
            level = "WARN"
            [ui]
            use_unicode = false
            "#,
        )
        .unwrap();

        let (resolved, warnings) = config.resolve();
        assert_eq!(
            resolved,
            ResolvedConfig {
                slot: "groceries".to_string(),
                max_bytes: 2048,
                log_level: LevelFilter::Warn,
                use_unicode: false,
            }
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_bad_values_fall_back_with_warnings() {
        let config: TicklistConfig = toml::from_str(
            r#"
            [storage]
            slot = "../etc/passwd"
            max_bytes = 0
            [log]
            level = "chatty"
            "#,
        )
        .unwrap();

        let (resolved, warnings) = config.resolve();
        assert_eq!(resolved, ResolvedConfig::default());
        assert_eq!(warnings.len(), 3);
        assert!(warnings[2].contains("chatty"));
    }

    #[test]
    fn test_slot_must_be_a_storage_key() {
        let config: TicklistConfig = toml::from_str("[storage]\nslot = \"  work-list \"\n").unwrap();
        let (resolved, warnings) = config.resolve();
        assert_eq!(resolved.slot, "work-list");
        assert!(warnings.is_empty());

        let config: TicklistConfig = toml::from_str("[storage]\nslot = \"my list\"\n").unwrap();
        let (resolved, warnings) = config.resolve();
        assert_eq!(resolved.slot, DEFAULT_SLOT);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[storage\nslot = ").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let config: TicklistConfig = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        let (resolved, warnings) = config.resolve();
        assert_eq!(resolved, ResolvedConfig::default());
        assert!(warnings.is_empty());
    }
}
