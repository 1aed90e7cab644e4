//! Settings management

use crate::input::KeyCode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tether_core::ecs::{Rigidbody, Transform};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings from {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid tick length in {path}: {value}s (expected 0 < delta_seconds <= {MAX_DELTA_SECONDS})")]
    DeltaSeconds { path: PathBuf, value: f32 },
}

/// Longest tick the simulation accepts, in seconds.
pub const MAX_DELTA_SECONDS: f32 = 60.0;

/// Engine settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub simulation: SimulationSettings,
    pub scripting: ScriptingSettings,
    pub logging: LoggingSettings,
    pub input: InputSettings,
    pub scene: SceneSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Ticks to run before the headless runtime exits.
    pub tick_count: u32,
    /// Seconds per tick fed to scripts.
    pub delta_seconds: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptingSettings {
    /// Log boundary calls against dead handles at warn level instead of debug.
    pub warn_on_stale_handles: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing-subscriber` env-filter directive, overridden by `RUST_LOG`.
    pub filter: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Keys reported as held for the whole run (headless driving).
    pub held: Vec<KeyCode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    pub entities: Vec<EntitySettings>,
}

/// One entity of the startup scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntitySettings {
    pub name: String,
    pub transform: Transform,
    pub rigidbody: Option<Rigidbody>,
    /// Script class attached to the entity, if any.
    pub script: Option<String>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            tick_count: 60,
            delta_seconds: 1.0 / 60.0,
        }
    }
}

impl Default for ScriptingSettings {
    fn default() -> Self {
        Self {
            warn_on_stale_handles: true,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string.
    pub fn from_json(source: &str, origin: &Path) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(source).map_err(|source| SettingsError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        let value = settings.simulation.delta_seconds;
        if !(value > 0.0 && value <= MAX_DELTA_SECONDS) {
            return Err(SettingsError::DeltaSeconds {
                path: origin.to_path_buf(),
                value,
            });
        }
        Ok(settings)
    }

    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&source, path)
    }

    /// Load settings, falling back to defaults when the file is missing or invalid.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(SettingsError::Io { path, source })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                tracing::info!(path = %path.display(), "no settings file, using defaults");
                Self::default()
            }
            Err(err) => {
                tracing::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }
}
