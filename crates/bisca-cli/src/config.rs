use bisca_core::game::{Delays, GameConfig};
use bisca_core::game::serialization::{MAX_SEATS, MIN_SEATS};
use bisca_core::model::rules::RuleVariant;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_PLAYERS: usize = 4;
const DEFAULT_SAVE_DIR: &str = ".bisca";
const DEFAULT_LOG_FILE: &str = "bisca.jsonl";
const MAX_DELAY_MS: u64 = 60_000;

/// Root session configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BiscaConfig {
    #[serde(default = "default_player_name")]
    pub player_name: String,
    #[serde(default = "default_players")]
    pub players: usize,
    pub variant: RuleVariant,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub delays: Delays,
    #[serde(default)]
    pub autopilot: bool,
    #[serde(default)]
    pub realtime: bool,
    #[serde(default = "default_save_dir")]
    pub save_dir: PathBuf,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BiscaConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: BiscaConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.player_name = self.player_name.trim().to_string();
        if self.player_name.is_empty() {
            return Err(invalid("player_name", "player name must not be empty"));
        }

        if !(MIN_SEATS..=MAX_SEATS).contains(&self.players) {
            return Err(invalid(
                "players",
                format!("between {MIN_SEATS} and {MAX_SEATS} players are supported"),
            ));
        }

        for (label, value) in [
            ("delays.bot_turn_ms", self.delays.bot_turn_ms),
            ("delays.trick_display_ms", self.delays.trick_display_ms),
            ("delays.next_round_ms", self.delays.next_round_ms),
            ("delays.resume_ms", self.delays.resume_ms),
        ] {
            if value > MAX_DELAY_MS {
                return Err(invalid(label, format!("delay must not exceed {MAX_DELAY_MS} ms")));
            }
        }

        if self.save_dir.as_os_str().is_empty() {
            return Err(invalid("save_dir", "path must not be empty"));
        }

        self.logging.normalize();
        if self.logging.level().is_none() {
            return Err(invalid(
                "logging.tracing_level",
                format!("unknown level '{}'", self.logging.tracing_level),
            ));
        }
        Ok(())
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new(self.variant).with_delays(self.delays)
    }

    /// Where the JSON log lines go; relative paths live under `save_dir`.
    pub fn log_path(&self) -> PathBuf {
        let file = self
            .logging
            .log_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
        if file.is_absolute() {
            file
        } else {
            self.save_dir.join(file)
        }
    }
}

fn default_player_name() -> String {
    "Giocatore".to_string()
}

fn default_players() -> usize {
    DEFAULT_PLAYERS
}

fn default_save_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SAVE_DIR)
}

/// Logging configuration defaults to human-readable output on stderr.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            log_file: None,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "warn".to_string()
}

fn invalid(field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError::InvalidField {
        field: field.to_string(),
        message: message.into(),
    }
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
