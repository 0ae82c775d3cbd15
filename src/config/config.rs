use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default workspace root scanned for dated markdown files
pub const DEFAULT_WORKSPACE_DIR: &str = "~/Code/github.com/laris-co/Nat-s-Agents/ψ";

/// Default repository queried for the day's commits
pub const DEFAULT_REPO_DIR: &str = "~/Code/github.com/laris-co/Nat-s-Agents";

/// Default maximum length of a commit message in the report
pub const DEFAULT_MESSAGE_LIMIT: usize = 60;

/// Application configuration
///
/// Every field has a default, so an empty or partial TOML file is valid.
///
/// ```toml
/// [workspace]
/// base_dir = "~/notes/ψ"
/// drafts = "writing/drafts"
///
/// [git]
/// repo_dir = "~/notes"
/// message_limit = 60
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub workspace: WorkspaceConfig,
    pub git: GitConfig,
}

/// Where the dated markdown files live
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Base directory the folders below are resolved against
    pub base_dir: PathBuf,
    /// Folder holding learnings, relative to `base_dir`
    pub learnings: String,
    /// Folder holding retrospectives, relative to `base_dir`
    pub retrospectives: String,
    /// Folder holding drafts, relative to `base_dir`
    pub drafts: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_WORKSPACE_DIR),
            learnings: "memory/learnings".to_string(),
            retrospectives: "memory/retrospectives".to_string(),
            drafts: "writing/drafts".to_string(),
        }
    }
}

/// How the day's commits are queried
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GitConfig {
    /// Repository passed to `git -C`
    pub repo_dir: PathBuf,
    /// Name or path of the git executable
    pub binary: String,
    /// Maximum number of characters kept from each commit subject
    pub message_limit: usize,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            repo_dir: PathBuf::from(DEFAULT_REPO_DIR),
            binary: "git".to_string(),
            message_limit: DEFAULT_MESSAGE_LIMIT,
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError` if the file cannot be read, `ConfigError::TomlError`
    /// if it is not valid TOML, and `ConfigError::ValidationError` for out-of-range values.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that all values are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let folders = [
            ("workspace.learnings", &self.workspace.learnings),
            ("workspace.retrospectives", &self.workspace.retrospectives),
            ("workspace.drafts", &self.workspace.drafts),
        ];
        for (key, folder) in folders {
            if folder.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{} must not be empty",
                    key
                )));
            }
            if Path::new(folder).is_absolute() {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be relative to workspace.base_dir, got '{}'",
                    key, folder
                )));
            }
        }

        if self.workspace.base_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "workspace.base_dir must not be empty".to_string(),
            ));
        }

        if self.git.repo_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "git.repo_dir must not be empty".to_string(),
            ));
        }

        if self.git.binary.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "git.binary must not be empty".to_string(),
            ));
        }

        if self.git.message_limit == 0 {
            return Err(ConfigError::ValidationError(
                "git.message_limit must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Workspace base directory with `~` expanded, made absolute
    pub fn workspace_dir(&self) -> PathBuf {
        resolve_path(&self.workspace.base_dir)
    }

    /// Repository directory with `~` expanded, made absolute
    pub fn repo_dir(&self) -> PathBuf {
        resolve_path(&self.git.repo_dir)
    }
}

/// Expand a leading `~` to the home directory and anchor relative paths at the
/// current directory
fn resolve_path(path: &Path) -> PathBuf {
    let expanded = match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    };
    std::path::absolute(&expanded).unwrap_or(expanded)
}
