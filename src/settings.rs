//! Application settings.
//!
//! Defaults can be overridden by an optional `settings.json` in the platform
//! config directory. The file is only ever read.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Directory name under the platform config dir.
const APP_DIR: &str = "video-converter";
const SETTINGS_FILE: &str = "settings.json";

/// Smallest window that still fits every control.
pub const MIN_WINDOW_SIZE: [f32; 2] = [360.0, 420.0];
const MAX_WINDOW_SIDE: f32 = 8192.0;

fn default_notification_secs() -> f32 {
    3.0
}

fn default_window_width() -> f32 {
    420.0
}

fn default_window_height() -> f32 {
    520.0
}

/// User-tunable settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Explicit FFmpeg binary, searched for when unset
    pub ffmpeg_path: Option<PathBuf>,
    /// Explicit FFprobe binary, searched for when unset
    pub ffprobe_path: Option<PathBuf>,
    /// How long the download notification stays visible
    pub notification_secs: f32,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            ffprobe_path: None,
            notification_secs: default_notification_secs(),
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

impl Settings {
    /// Location of the settings file, if the platform has a config dir.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
    }

    /// Load settings from the default location, falling back to defaults.
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_or_default(&path),
            None => Self::default(),
        }
    }

    /// Load settings from `path`. A missing file gives the defaults; an
    /// unreadable or malformed one is logged and also gives the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings: {:#}", e);
                Self::default()
            }
        }
    }

    fn load_from(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let settings = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(settings)
    }

    /// Notification lifetime, clamped to 0..=60 seconds.
    pub fn notification_duration(&self) -> Duration {
        let secs = if self.notification_secs.is_finite() {
            self.notification_secs.clamp(0.0, 60.0)
        } else {
            default_notification_secs()
        };
        Duration::from_secs_f32(secs)
    }

    /// Initial window size. Non-finite sides fall back to the default, the
    /// rest are clamped to `MIN_WINDOW_SIZE..=8192`.
    pub fn window_size(&self) -> [f32; 2] {
        let side = |value: f32, default: f32, min: f32| {
            if value.is_finite() {
                value.clamp(min, MAX_WINDOW_SIDE)
            } else {
                default
            }
        };
        [
            side(self.window_width, default_window_width(), MIN_WINDOW_SIZE[0]),
            side(self.window_height, default_window_height(), MIN_WINDOW_SIZE[1]),
        ]
    }
}
