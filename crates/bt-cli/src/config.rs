//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root of the tracked workspace (one git repository).
    pub repo_root: PathBuf,

    /// Overrides the time log location. Defaults to
    /// `.branchtime/branch-time.json` under the workspace root.
    pub log_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo_root: PathBuf::from("."),
            log_path: None,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (BT_*)
        figment = figment.merge(Env::prefixed("BT_"));

        figment.extract()
    }

    /// Resolves the time log path: the override if set, otherwise the
    /// workspace-local default.
    pub fn log_path(&self) -> PathBuf {
        self.log_path
            .clone()
            .unwrap_or_else(|| self.repo_root.join(".branchtime").join("branch-time.json"))
    }
}

/// Returns the platform-specific config directory for bt.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("bt"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_log_path_is_under_repo_root() {
        let config = Config {
            repo_root: PathBuf::from("/work/repo"),
            log_path: None,
        };
        assert_eq!(
            config.log_path(),
            PathBuf::from("/work/repo/.branchtime/branch-time.json")
        );
    }

    #[test]
    fn explicit_log_path_wins() {
        let config = Config {
            repo_root: PathBuf::from("/work/repo"),
            log_path: Some(PathBuf::from("/elsewhere/log.json")),
        };
        assert_eq!(config.log_path(), PathBuf::from("/elsewhere/log.json"));
    }

    #[test]
    fn default_repo_root_is_cwd() {
        assert_eq!(Config::default().repo_root, PathBuf::from("."));
    }
}
