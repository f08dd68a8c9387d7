use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Naming conventions for a conversation tree.
///
/// Derived ids look like `{turn}{fragment_infix}{index}:{kind}` for fragments
/// and `{anchor}{branch_separator}{label}` for branch roots; collisions get
/// `{suffix_separator}{n}` appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub root_id: String,
    pub default_branch_label: String,
    pub fragment_infix: String,
    pub branch_separator: String,
    pub suffix_separator: String,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

const ROOT_ID_ENV: &str = "CONVERSATION_TREE_ROOT_ID";
const BRANCH_LABEL_ENV: &str = "CONVERSATION_TREE_BRANCH_LABEL";

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            root_id: "root".to_string(),
            default_branch_label: "branch".to_string(),
            fragment_infix: "::part-".to_string(),
            branch_separator: "::".to_string(),
            suffix_separator: "-".to_string(),
        }
    }
}

impl TreeConfig {
    /// Load from a `.toml` or `.json` file. Missing fields keep their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let config: TreeConfig = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                ))
            }
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), root_id = %config.root_id, "TreeConfig: loaded");
        Ok(config)
    }

    /// Apply `CONVERSATION_TREE_ROOT_ID` / `CONVERSATION_TREE_BRANCH_LABEL`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(root_id) = std::env::var(ROOT_ID_ENV) {
            self.root_id = root_id;
        }
        if let Ok(label) = std::env::var(BRANCH_LABEL_ENV) {
            self.default_branch_label = label;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("root_id", &self.root_id),
            ("default_branch_label", &self.default_branch_label),
            ("fragment_infix", &self.fragment_infix),
            ("branch_separator", &self.branch_separator),
            ("suffix_separator", &self.suffix_separator),
        ];
        for (name, value) in required {
            if value.is_empty() {
                return Err(ConfigError::Invalid(format!("{name} cannot be empty")));
            }
        }
        Ok(())
    }

    pub(crate) fn fragment_id(&self, turn_id: &str, index: usize, kind: &str) -> String {
        format!("{turn_id}{}{index}:{kind}", self.fragment_infix)
    }

    pub(crate) fn branch_id(&self, anchor_id: &str, label: &str) -> String {
        format!("{anchor_id}{}{label}", self.branch_separator)
    }
}
