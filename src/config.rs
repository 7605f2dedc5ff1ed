//! Conversion parameters and application configuration.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::{
    foundation::{
        core::{ExportRange, FrameIndex},
        error::{LottieSeqError, LottieSeqResult},
    },
    svg::optimize::OptimizerKind,
};

/// Highest accepted frame rate.
pub const MAX_FRAME_RATE: u32 = 1000;
/// Highest accepted start/end frame.
pub const MAX_FRAME: u64 = 10_000;

/// Caller-supplied parameters of one conversion run. Nothing else affects the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionParams {
    /// Lottie frame rate.
    pub frame_rate: u32,
    /// First host frame to export.
    pub frame_start: u64,
    /// Last host frame to export (inclusive).
    pub frame_end: u64,
    /// Run each frame through an optimizer before embedding it.
    pub optimize: bool,
}

impl Default for ConversionParams {
    fn default() -> Self {
        Self {
            frame_rate: 24,
            frame_start: 1,
            frame_end: 250,
            optimize: true,
        }
    }
}

impl ConversionParams {
    /// Check bounds: `1 <= frame_rate <= 1000`, frames within `0..=10000`, `start <= end`.
    pub fn validate(&self) -> LottieSeqResult<()> {
        if !(1..=MAX_FRAME_RATE).contains(&self.frame_rate) {
            return Err(LottieSeqError::validation(format!(
                "frame_rate must be within 1..={MAX_FRAME_RATE}, got {}",
                self.frame_rate
            )));
        }
        for (name, value) in [("frame_start", self.frame_start), ("frame_end", self.frame_end)] {
            if value > MAX_FRAME {
                return Err(LottieSeqError::validation(format!(
                    "{name} must be within 0..={MAX_FRAME}, got {value}"
                )));
            }
        }
        if self.frame_end < self.frame_start {
            return Err(LottieSeqError::validation(format!(
                "frame_end ({}) must be >= frame_start ({})",
                self.frame_end, self.frame_start
            )));
        }
        Ok(())
    }

    /// Validated [`ExportRange`].
    pub fn range(&self) -> LottieSeqResult<ExportRange> {
        self.validate()?;
        ExportRange::new(
            FrameIndex(self.frame_start),
            FrameIndex(self.frame_end),
            self.frame_rate,
        )
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "lottieseq=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default conversion parameters; CLI flags override them.
    pub params: ConversionParams,

    /// Optimizer used when `params.optimize` is set.
    pub optimizer: OptimizerKind,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load config from an explicit file. Missing or malformed files are errors.
    pub fn from_file(path: &Path) -> LottieSeqResult<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        serde_json::from_str(&content).map_err(|e| {
            LottieSeqError::serde(format!("parse config '{}': {e}", path.display()))
        })
    }

    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::from_file(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> LottieSeqResult<()> {
        crate::foundation::core::ensure_parent_dir(path)?;
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| LottieSeqError::serde(format!("serialize config: {e}")))?;
        std::fs::write(path, json).with_context(|| format!("write config '{}'", path.display()))?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("lottieseq").join("config.json")
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
