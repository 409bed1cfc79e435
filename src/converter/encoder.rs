//! Media encoder contract.
//!
//! The converter never touches codecs itself. It loads a clip, hands it to one
//! of the encoder's writers and listens to the progress bars the encoder
//! reports while it works.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::formats::{EncodePlan, OutputFormat};

/// Errors raised while reading or writing media.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("FFmpeg binary not found. Please install FFmpeg.")]
    NotFound,
    #[error("FFprobe binary not found. Please install FFmpeg.")]
    ProbeNotFound,
    #[error("Input file does not exist: {}", .0.display())]
    InputMissing(PathBuf),
    #[error("Failed to spawn encoder process: {0}")]
    Spawn(std::io::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to read video info: {0}")]
    Probe(String),
    #[error("No video stream found in {}", .0.display())]
    NoVideoStream(PathBuf),
    #[error("Encoding failed: {0}")]
    Failed(String),
}

/// Metadata of a loaded source clip.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoClip {
    pub path: PathBuf,
    pub duration_seconds: f64,
    pub frame_rate: f64,
    pub total_frames: u64,
    pub has_audio: bool,
}

/// Receives the encoder's progress bar notifications.
///
/// `bar` names a unit of encoder work, `attr` the attribute that changed.
/// `total` is only present when the encoder announces (or re-announces) the
/// size of the bar.
pub trait ProgressHook {
    fn bars_callback(&mut self, bar: &str, attr: &str, value: f64, total: Option<f64>);
}

/// An external media library able to load clips and write them out.
pub trait MediaEncoder: Send + Sync {
    /// Open a source clip and read its metadata.
    fn load_clip(&self, path: &Path) -> Result<VideoClip, EncodeError>;

    /// Write the clip as an animated GIF.
    fn write_gif(
        &self,
        clip: &VideoClip,
        output: &Path,
        hook: &mut dyn ProgressHook,
    ) -> Result<(), EncodeError>;

    /// Write the clip as a video file using the given video codec.
    fn write_video(
        &self,
        clip: &VideoClip,
        output: &Path,
        codec: &str,
        hook: &mut dyn ProgressHook,
    ) -> Result<(), EncodeError>;
}

/// Load `input` and write it to `output` with the writer `format` calls for.
pub fn transcode(
    encoder: &dyn MediaEncoder,
    input: &Path,
    output: &Path,
    format: OutputFormat,
    hook: &mut dyn ProgressHook,
) -> Result<(), EncodeError> {
    let clip = encoder.load_clip(input)?;
    match format.encode_plan() {
        EncodePlan::Gif => encoder.write_gif(&clip, output, hook),
        EncodePlan::Video { codec } => encoder.write_video(&clip, output, codec, hook),
    }
}
