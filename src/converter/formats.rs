//! Output format definitions and output path naming.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Suffix appended to the input file stem for converted files.
const CONVERTED_SUFFIX: &str = "_converted";

/// Output container/codec choices offered in the format dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// MPEG-4 container, H.264 video
    Mp4,
    /// AVI container
    Avi,
    /// Animated GIF
    Gif,
}

/// Which encoder writer a format goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodePlan {
    /// Animated GIF writer
    Gif,
    /// Generic video writer with an explicit video codec
    Video { codec: &'static str },
}

impl OutputFormat {
    /// Returns the label shown in the dropdown.
    pub fn display_name(&self) -> &'static str {
        match self {
            OutputFormat::Mp4 => "MP4",
            OutputFormat::Avi => "AVI",
            OutputFormat::Gif => "GIF",
        }
    }

    /// Returns the lowercase file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Mp4 => "mp4",
            OutputFormat::Avi => "avi",
            OutputFormat::Gif => "gif",
        }
    }

    /// Returns the writer and codec used to produce this format.
    ///
    /// AVI is written with the `png` video codec.
    // TODO: settle the AVI video codec with product; `png` gives huge files.
    pub fn encode_plan(&self) -> EncodePlan {
        match self {
            OutputFormat::Mp4 => EncodePlan::Video { codec: "libx264" },
            OutputFormat::Avi => EncodePlan::Video { codec: "png" },
            OutputFormat::Gif => EncodePlan::Gif,
        }
    }

    /// All available formats, in dropdown order.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Mp4, OutputFormat::Avi, OutputFormat::Gif]
    }
}

/// Derive the converted file path: `<input without extension>_converted.<ext>`,
/// placed next to the input.
pub fn output_path(input: &Path, format: OutputFormat) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("output"));
    name.push(CONVERTED_SUFFIX);
    name.push(".");
    name.push(format.extension());
    input.with_file_name(name)
}
