use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::audio_system::AudioMode;
use crate::error::ConfigError;

/// Application folder under the platform config directory
pub const APP_DIR_NAME: &str = "LearnEng";

const MAX_DELAY_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Root directory that bundled sound and image keys resolve against
    pub assets_dir: String,

    /// Optional catalog file replacing the embedded one
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// Playback volume (0.0-1.0)
    pub volume: f32,

    /// Fade in applied to every clip, in milliseconds
    #[serde(default)]
    pub fade_in_ms: Option<u64>,

    /// Hard cap on clip length, in milliseconds
    #[serde(default)]
    pub clip_limit_ms: Option<u64>,

    /// How long a match attempt stays visible before selections clear
    pub feedback_delay_ms: u64,

    /// Delay between the last match and the congratulation message
    pub celebration_delay_ms: u64,

    /// Fill in missing sound references from files named by convention
    #[serde(default = "default_true")]
    pub attach_conventional_audio: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            assets_dir: "assets".to_string(),
            catalog_path: None,
            volume: 1.0,
            fade_in_ms: None,
            clip_limit_ms: Some(10_000),
            feedback_delay_ms: 500,
            celebration_delay_ms: 1000,
            attach_conventional_audio: true,
        }
    }
}

impl Config {
    /// Load configuration from the platform-specific config directory.
    /// Creates default config if file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let config = Self::load_from(&config_path)?;
            tracing::info!("✓ Loaded config from: {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(&config_path)?;
            tracing::info!("✓ Created default config at: {}", config_path.display());
            Ok(config)
        }
    }

    /// Load and validate configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        let config: Config =
            serde_json::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the platform config directory
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::DirectoryCreationFailed {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        fs::write(path, json).map_err(|e| ConfigError::SaveFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        Ok(())
    }

    /// Reject values the player cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(ConfigError::Invalid(format!(
                "volume must be between 0.0 and 1.0, got {}",
                self.volume
            )));
        }
        if self.feedback_delay_ms > MAX_DELAY_MS {
            return Err(ConfigError::Invalid(format!(
                "feedback_delay_ms must be at most {}ms",
                MAX_DELAY_MS
            )));
        }
        if self.celebration_delay_ms > MAX_DELAY_MS {
            return Err(ConfigError::Invalid(format!(
                "celebration_delay_ms must be at most {}ms",
                MAX_DELAY_MS
            )));
        }
        Ok(())
    }

    /// Application directory in the user config folder
    pub fn app_dir() -> Result<PathBuf, ConfigError> {
        let base = dirs::config_dir().ok_or_else(|| {
            ConfigError::Invalid("Could not determine user config directory".to_string())
        })?;
        Ok(base.join(APP_DIR_NAME))
    }

    /// Get the config file path
    fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::app_dir()?.join("config.json"))
    }

    /// Get the config file path for display purposes
    pub fn config_path_display() -> String {
        Self::config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "unknown".to_string())
    }

    /// Resolve the assets directory (relative to the app directory)
    pub fn assets_root(&self) -> PathBuf {
        resolve_in_app_dir(&self.assets_dir)
    }

    /// Override catalog file, if one is configured
    pub fn catalog_file(&self) -> Option<PathBuf> {
        self.catalog_path.as_deref().map(resolve_in_app_dir)
    }

    /// Playback effects derived from these settings
    pub fn audio_mode(&self) -> AudioMode {
        let mut mode = AudioMode::none().with_volume(self.volume);
        if let Some(ms) = self.fade_in_ms {
            mode = mode.with_fade_in(ms);
        }
        if let Some(ms) = self.clip_limit_ms {
            mode = mode.with_limit(ms);
        }
        mode
    }

    pub fn feedback_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.feedback_delay_ms)
    }

    pub fn celebration_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.celebration_delay_ms)
    }
}

fn resolve_in_app_dir(path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        return path;
    }
    match Config::app_dir() {
        Ok(dir) => dir.join(path),
        Err(_) => path,
    }
}
