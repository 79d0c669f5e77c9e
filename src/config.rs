//! Application configuration, loadable from TOML.
//!
//! ```toml
//! [ai]
//! difficulty = "hard"
//! human_player = "B"
//!
//! [network]
//! server_addr = "192.168.0.10:9000"
//! player_name = "alice"
//! ```
//!
//! Every field has a default, so an empty or partial file is valid.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::board::Player;
use crate::engine::Difficulty;
use crate::error::ConfigError;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "OTHELLO_CONFIG";
/// Config file looked up in the working directory when `CONFIG_ENV` is unset
pub const DEFAULT_CONFIG_FILE: &str = "othello.toml";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ai: AiConfig,
    pub network: NetworkConfig,
    pub window: WindowConfig,
}

/// Computer opponent settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    /// Side the human plays in single-player mode
    pub human_player: Player,
    /// Pause before the computer replies so its moves are visible
    pub think_delay: bool,
    pub delay_easy_ms: u64,
    pub delay_medium_ms: u64,
    pub delay_hard_ms: u64,
    /// Upper bound (exclusive) of the random extra delay
    pub delay_jitter_ms: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            human_player: Player::A,
            think_delay: true,
            delay_easy_ms: 500,
            delay_medium_ms: 1000,
            delay_hard_ms: 1500,
            delay_jitter_ms: 500,
        }
    }
}

impl AiConfig {
    /// Base thinking delay for a tier, before jitter. Zero when delays are off.
    pub fn base_delay(&self, difficulty: Difficulty) -> Duration {
        if !self.think_delay {
            return Duration::ZERO;
        }
        let ms = match difficulty {
            Difficulty::Easy => self.delay_easy_ms,
            Difficulty::Medium => self.delay_medium_ms,
            Difficulty::Hard => self.delay_hard_ms,
        };
        Duration::from_millis(ms)
    }

    /// Jitter bound, zero when delays are off.
    pub fn jitter(&self) -> Duration {
        if self.think_delay {
            Duration::from_millis(self.delay_jitter_ms)
        } else {
            Duration::ZERO
        }
    }
}

/// Online play settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Socket.IO room server: `host:port`, `http://host:port` or a `ws://` URL
    pub server_addr: String,
    /// Name pre-filled in the lobby
    pub player_name: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:9000".to_string(),
            player_name: String::new(),
        }
    }
}

/// Initial window size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 720.0,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate configuration text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Config file path: `$OTHELLO_CONFIG`, else `othello.toml`.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width < 480.0 {
            return Err(ConfigError::Invalid("window.width must be at least 480".into()));
        }
        if self.window.height < 400.0 {
            return Err(ConfigError::Invalid("window.height must be at least 400".into()));
        }
        if self.network.server_addr.trim().is_empty() {
            return Err(ConfigError::Invalid("network.server_addr must not be empty".into()));
        }
        Ok(())
    }
}
