use crate::action::Action;
use invader_core::game::{AdversarySlot, GameConfig};
use invader_core::model::Adversary;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

/// A scripted game loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Script {
    #[serde(default)]
    pub game: GameConfig,
    pub actions: Vec<Action>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Script {
    /// Load and validate a script from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ScriptError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let mut script: Script =
            serde_yaml::from_reader(BufReader::new(file)).map_err(|source| ScriptError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        script.validate().map_err(|source| ScriptError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(script)
    }

    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_slot("game.leading", &self.game.leading)?;
        validate_slot("game.supporting", &self.game.supporting)?;
        if self.actions.is_empty() {
            return Err(ValidationError::InvalidField {
                field: "actions".to_string(),
                message: "at least one action must be specified".to_string(),
            });
        }
        self.logging.validate()
    }
}

fn validate_slot(field: &str, slot: &AdversarySlot) -> Result<(), ValidationError> {
    if slot.level > Adversary::MAX_LEVEL {
        return Err(ValidationError::InvalidField {
            field: format!("{field}.level"),
            message: format!(
                "level {} is above the maximum of {}",
                slot.level,
                Adversary::MAX_LEVEL
            ),
        });
    }
    Ok(())
}

/// Diagnostics go to stderr unless `file` is set.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
            file: None,
        }
    }
}

impl LoggingConfig {
    fn validate(&mut self) -> Result<(), ValidationError> {
        if self.level.trim().is_empty() {
            self.level = default_level();
        }
        if self.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.level".to_string(),
                message: format!(
                    "unknown level '{}' (expected trace, debug, info, warn or error)",
                    self.level
                ),
            });
        }
        Ok(())
    }

    pub fn level(&self) -> Option<Level> {
        match self.level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse script {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid script {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ScriptError {
    pub fn path(&self) -> &Path {
        match self {
            ScriptError::Read { path, .. }
            | ScriptError::Parse { path, .. }
            | ScriptError::Invalid { path, .. } => path,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
