//! Video Converter Module
//!
//! Converts a video to MP4, AVI or GIF using FFmpeg and copies the result to
//! a location of the user's choosing.

pub mod encoder;
pub mod ffmpeg;
pub mod formats;
pub mod progress;
pub mod save;
pub mod state;
pub mod worker;

pub use encoder::{EncodeError, MediaEncoder, ProgressHook, VideoClip};
pub use ffmpeg::FfmpegEncoder;
pub use formats::{output_path, EncodePlan, OutputFormat};
pub use progress::ProgressAdapter;
pub use save::{save_converted, SaveError};
pub use state::{ConverterState, Phase, SharedState, StartError, StateSnapshot};
pub use worker::{ConversionWorker, RepaintFn};
