//! Shared converter state.
//!
//! The UI thread renders from [`StateSnapshot`]s and the worker thread writes
//! progress and results through the same `Arc<Mutex<_>>`. Button enablement
//! and progress visibility are derived from the phase, never stored.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use thiserror::Error;

use super::formats::{output_path, OutputFormat};
use super::save::SaveError;

pub const MSG_MISSING_INPUT: &str = "Please select a video file and an output format.";
pub const MSG_CONVERTING: &str = "Converting, please wait...";
pub const MSG_CONVERTED: &str = "Conversion successful! Click Download.";
pub const MSG_DOWNLOADED: &str = "Download successful!";
pub const MSG_DOWNLOAD_NOTICE: &str = "Download completed!";

/// State shared between the UI and the conversion worker.
pub type SharedState = Arc<Mutex<ConverterState>>;

/// Lock the shared state, recovering the data if a previous holder panicked.
pub fn lock_state(state: &SharedState) -> MutexGuard<'_, ConverterState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Why a conversion request was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StartError {
    #[error("{}", MSG_MISSING_INPUT)]
    MissingInput,
    #[error("A conversion is already running")]
    Busy,
}

/// Conversion phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
}

/// Everything the worker needs for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,
}

/// A message shown briefly at the bottom of the window.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub expires_at: Instant,
}

/// What the UI draws in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSnapshot {
    pub file_label: String,
    pub format: Option<OutputFormat>,
    pub status: String,
    /// `None` while the progress bar is hidden
    pub progress: Option<f32>,
    pub convert_enabled: bool,
    pub download_enabled: bool,
    pub notification: Option<String>,
}

/// Converter state machine: `Idle -> Running -> Idle`, with the outcome of
/// the last run kept in `converted_path` and `status`.
#[derive(Debug)]
pub struct ConverterState {
    input: Option<PathBuf>,
    format: Option<OutputFormat>,
    file_label: String,
    status: String,
    phase: Phase,
    progress: f32,
    /// Set only after a successful run, cleared when the next one starts
    converted_path: Option<PathBuf>,
    notification: Option<Notification>,
    notification_duration: Duration,
}

impl ConverterState {
    pub fn new(notification_duration: Duration) -> Self {
        Self {
            input: None,
            format: None,
            file_label: String::new(),
            status: String::new(),
            phase: Phase::Idle,
            progress: 0.0,
            converted_path: None,
            notification: None,
            notification_duration,
        }
    }

    /// Wrap the state for sharing with a worker.
    pub fn shared(self) -> SharedState {
        Arc::new(Mutex::new(self))
    }

    /// Record the file chosen in the input picker.
    pub fn select_input(&mut self, path: PathBuf) {
        self.file_label = format!("Selected file: {}", path.display());
        self.input = Some(path);
    }

    /// Record the format chosen in the dropdown.
    pub fn select_format(&mut self, format: OutputFormat) {
        self.format = Some(format);
    }

    pub fn input(&self) -> Option<&Path> {
        self.input.as_deref()
    }

    pub fn format(&self) -> Option<OutputFormat> {
        self.format
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Path of the last successful conversion, if any.
    pub fn converted_path(&self) -> Option<&Path> {
        self.converted_path.as_deref()
    }

    /// Validate the selection and move to `Running`.
    ///
    /// Refuses while another run is active, and refuses (with a status
    /// message) when the input or the format is missing.
    pub fn begin_conversion(&mut self) -> Result<ConversionRequest, StartError> {
        if self.phase != Phase::Idle {
            return Err(StartError::Busy);
        }

        let (Some(input), Some(format)) = (self.input.clone(), self.format) else {
            self.status = MSG_MISSING_INPUT.to_string();
            return Err(StartError::MissingInput);
        };

        let output = output_path(&input, format);
        self.file_label = format!("File: {}", input.display());
        self.phase = Phase::Running;
        self.progress = 0.0;
        self.converted_path = None;
        self.status = MSG_CONVERTING.to_string();

        Ok(ConversionRequest {
            input,
            output,
            format,
        })
    }

    /// Update the progress fraction. Ignored unless a run is active.
    pub fn set_progress(&mut self, fraction: f32) {
        if self.phase == Phase::Running {
            self.progress = fraction.clamp(0.0, 1.0);
        }
    }

    /// Record the outcome of the active run and return to `Idle`.
    pub fn finish_conversion(&mut self, result: Result<PathBuf, String>) {
        match result {
            Ok(path) => {
                self.converted_path = Some(path);
                self.status = MSG_CONVERTED.to_string();
            }
            Err(message) => {
                self.converted_path = None;
                self.status = format!("Error: {}", message);
            }
        }
        self.phase = Phase::Idle;
        self.progress = 0.0;
    }

    /// File the save dialog should copy from, if downloading is allowed.
    pub fn download_source(&self) -> Option<PathBuf> {
        if self.phase == Phase::Idle {
            self.converted_path.clone()
        } else {
            None
        }
    }

    /// Report the outcome of a save/copy.
    pub fn record_save(&mut self, result: &Result<u64, SaveError>) {
        match result {
            Ok(_) => {
                self.status = MSG_DOWNLOADED.to_string();
                self.notify(MSG_DOWNLOAD_NOTICE);
            }
            Err(e) => {
                let message = format!("Download failed: {}", e);
                self.notify(&message);
                self.status = message;
            }
        }
    }

    /// Show a transient notification.
    pub fn notify(&mut self, message: &str) {
        self.notification = Some(Notification {
            message: message.to_string(),
            expires_at: Instant::now() + self.notification_duration,
        });
    }

    /// Current notification, dropping it once expired.
    pub fn active_notification(&mut self, now: Instant) -> Option<&Notification> {
        if self
            .notification
            .as_ref()
            .is_some_and(|n| now >= n.expires_at)
        {
            self.notification = None;
        }
        self.notification.as_ref()
    }

    /// Capture what the UI needs for this frame.
    pub fn snapshot(&mut self, now: Instant) -> StateSnapshot {
        let notification = self.active_notification(now).map(|n| n.message.clone());
        let running = self.phase == Phase::Running;
        StateSnapshot {
            file_label: self.file_label.clone(),
            format: self.format,
            status: self.status.clone(),
            progress: running.then_some(self.progress),
            convert_enabled: !running,
            download_enabled: !running && self.converted_path.is_some(),
            notification,
        }
    }
}

impl Default for ConverterState {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}
