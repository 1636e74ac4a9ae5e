//! Publisher configuration with optional TOML file loading.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Command that regenerates the documentation
pub const DEFAULT_BUILD_COMMAND: &str = "npm run prepare-docs";

/// Directory the build writes into, relative to the repository root
pub const DEFAULT_DOCS_DIR: &str = "docs";

/// Message used for every documentation commit
pub const DEFAULT_COMMIT_MESSAGE: &str = "Update docs";

/// Settings for one publish run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublisherConfig {
    /// Shell command line that regenerates the documentation
    pub build_command: String,
    /// Generated documentation directory, relative to the repository root
    pub docs_dir: PathBuf,
    /// Commit message for documentation updates
    pub commit_message: String,
    /// Per-command timeout in seconds; `None` waits forever
    pub timeout_secs: Option<u64>,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            build_command: DEFAULT_BUILD_COMMAND.to_string(),
            docs_dir: PathBuf::from(DEFAULT_DOCS_DIR),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            timeout_secs: None,
        }
    }
}

impl PublisherConfig {
    /// Load configuration from a TOML file, filling gaps with defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Per-command timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Reject values that cannot produce a meaningful run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.build_command.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "build_command",
                reason: "must not be empty".to_string(),
            });
        }

        if self.commit_message.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "commit_message",
                reason: "must not be empty".to_string(),
            });
        }

        if self.docs_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "docs_dir",
                reason: "must not be empty".to_string(),
            });
        }

        if self.docs_dir.is_absolute() {
            return Err(ConfigError::InvalidValue {
                field: "docs_dir",
                reason: format!(
                    "must be relative to the repository root, got {}",
                    self.docs_dir.display()
                ),
            });
        }

        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: "must be at least 1 second".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_documented_behavior() {
        let config = PublisherConfig::default();
        assert_eq!(config.build_command, "npm run prepare-docs");
        assert_eq!(config.docs_dir, PathBuf::from("docs"));
        assert_eq!(config.commit_message, "Update docs");
        assert_eq!(config.timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "docs_dir = \"site/api\"\ntimeout_secs = 90").unwrap();

        let config = PublisherConfig::load(file.path()).unwrap();
        assert_eq!(config.docs_dir, PathBuf::from("site/api"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(90)));
        assert_eq!(config.commit_message, DEFAULT_COMMIT_MESSAGE);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "push = true").unwrap();

        let err = PublisherConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailed { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PublisherConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFailed { .. }));
    }

    #[test]
    fn validation_rejects_unusable_values() {
        let blank_build = PublisherConfig {
            build_command: "  ".to_string(),
            ..Default::default()
        };
        assert!(blank_build.validate().is_err());

        let zero_timeout = PublisherConfig {
            timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(zero_timeout.validate().is_err());

        let empty_dir = PublisherConfig {
            docs_dir: PathBuf::new(),
            ..Default::default()
        };
        assert!(empty_dir.validate().is_err());
    }
}
