//! Video Converter Library
//!
//! A small desktop utility that converts a video file to MP4, AVI or GIF with
//! FFmpeg and lets the user save the result wherever they like.

pub mod app;
pub mod converter;
pub mod settings;

// Re-export commonly used types
pub use app::VideoConverterApp;
pub use converter::{ConverterState, FfmpegEncoder, MediaEncoder, OutputFormat, ProgressAdapter};
pub use settings::Settings;
