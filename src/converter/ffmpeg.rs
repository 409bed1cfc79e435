//! FFmpeg-backed media encoder.
//!
//! Clips are probed with FFprobe and written by an FFmpeg child process whose
//! `-progress pipe:1` output is turned into progress bar notifications.

use std::collections::VecDeque;
use std::ffi::OsString;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;

use serde::Deserialize;

use super::encoder::{EncodeError, MediaEncoder, ProgressHook, VideoClip};

/// Name of the encoder progress bar counting written frames.
pub const FRAME_BAR: &str = "frame_index";
/// Name of the encoder progress bar counting output seconds.
pub const TIME_BAR: &str = "t";

/// Stderr lines kept for error messages.
const STDERR_TAIL: usize = 8;

/// FFmpeg's closing line on any failure; says nothing about the cause.
const GENERIC_FAILURE: &str = "Conversion failed!";

/// Most stderr lines quoted in a failure message.
const FAILURE_LINES: usize = 3;

/// GIF filter graph: build a palette from the clip, then map onto it.
const GIF_FILTER: &str = "split[a][b];[a]palettegen[p];[b][p]paletteuse";

/// FFmpeg wrapper implementing [`MediaEncoder`].
pub struct FfmpegEncoder {
    /// Path to FFmpeg binary
    ffmpeg_path: Option<PathBuf>,
    /// Path to FFprobe binary (for clip metadata)
    ffprobe_path: Option<PathBuf>,
}

impl FfmpegEncoder {
    /// Locate FFmpeg and FFprobe, preferring explicit overrides.
    pub fn new(ffmpeg_override: Option<PathBuf>, ffprobe_override: Option<PathBuf>) -> Self {
        let ffmpeg_path = find_binary("ffmpeg", ffmpeg_override);
        let ffprobe_path = find_binary("ffprobe", ffprobe_override);

        match &ffmpeg_path {
            Some(path) => log::info!("Using FFmpeg at {}", path.display()),
            None => log::warn!("FFmpeg not found"),
        }
        if ffprobe_path.is_none() {
            log::warn!("FFprobe not found");
        }

        Self {
            ffmpeg_path,
            ffprobe_path,
        }
    }

    /// Message to show when the encoder cannot run at all.
    pub fn availability_error(&self) -> Option<String> {
        if self.ffmpeg_path.is_none() {
            Some(EncodeError::NotFound.to_string())
        } else if self.ffprobe_path.is_none() {
            Some(EncodeError::ProbeNotFound.to_string())
        } else {
            None
        }
    }

    /// Run FFmpeg with `args`, forwarding progress to `hook`.
    fn run(
        &self,
        clip: &VideoClip,
        args: Vec<OsString>,
        hook: &mut dyn ProgressHook,
    ) -> Result<(), EncodeError> {
        let ffmpeg = self.ffmpeg_path.as_ref().ok_or(EncodeError::NotFound)?;
        log::debug!("{} {:?}", ffmpeg.display(), args);

        let mut child = Command::new(ffmpeg)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(EncodeError::Spawn)?;

        // Drain stderr on the side so FFmpeg never blocks on a full pipe.
        let stderr_tail = Arc::new(Mutex::new(VecDeque::with_capacity(STDERR_TAIL)));
        let stderr_reader = child.stderr.take().map(|stderr| {
            let tail = Arc::clone(&stderr_tail);
            thread::spawn(move || {
                for line in BufReader::new(stderr).lines().map_while(Result::ok) {
                    let line = line.trim().to_string();
                    if line.is_empty() {
                        continue;
                    }
                    let mut tail = tail.lock().unwrap_or_else(|e| e.into_inner());
                    if tail.len() == STDERR_TAIL {
                        tail.pop_front();
                    }
                    tail.push_back(line);
                }
            })
        });

        let mut parser = ProgressParser::new(clip);
        parser.announce(hook);
        if let Some(stdout) = child.stdout.take() {
            for line in BufReader::new(stdout).lines().map_while(Result::ok) {
                if parser.feed(&line, hook) {
                    break;
                }
            }
        }

        let status = child.wait()?;
        if let Some(handle) = stderr_reader {
            if handle.join().is_err() {
                log::error!("FFmpeg stderr reader panicked");
            }
        }

        if status.success() {
            Ok(())
        } else {
            let tail = stderr_tail.lock().unwrap_or_else(|e| e.into_inner());
            Err(EncodeError::Failed(failure_detail(&tail, status.code())))
        }
    }
}

/// Summarize FFmpeg's last stderr lines, skipping the generic closing line.
fn failure_detail(tail: &VecDeque<String>, code: Option<i32>) -> String {
    let lines: Vec<&str> = tail
        .iter()
        .map(String::as_str)
        .filter(|line| *line != GENERIC_FAILURE)
        .collect();
    if lines.is_empty() {
        return format!("FFmpeg exited with code: {:?}", code);
    }
    lines[lines.len().saturating_sub(FAILURE_LINES)..].join("; ")
}

impl MediaEncoder for FfmpegEncoder {
    fn load_clip(&self, path: &Path) -> Result<VideoClip, EncodeError> {
        if !path.exists() {
            return Err(EncodeError::InputMissing(path.to_path_buf()));
        }
        let ffprobe = self.ffprobe_path.as_ref().ok_or(EncodeError::ProbeNotFound)?;

        let output = Command::new(ffprobe)
            .args([
                "-v", "error",
                "-print_format", "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path)
            .output()
            .map_err(EncodeError::Spawn)?;

        if !output.status.success() {
            return Err(EncodeError::Probe(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        parse_probe_output(path, &String::from_utf8_lossy(&output.stdout))
    }

    fn write_gif(
        &self,
        clip: &VideoClip,
        output: &Path,
        hook: &mut dyn ProgressHook,
    ) -> Result<(), EncodeError> {
        self.run(clip, gif_args(clip, output), hook)
    }

    fn write_video(
        &self,
        clip: &VideoClip,
        output: &Path,
        codec: &str,
        hook: &mut dyn ProgressHook,
    ) -> Result<(), EncodeError> {
        self.run(clip, video_args(clip, output, codec), hook)
    }
}

/// Find a binary: explicit override, then `PATH`, then common install
/// locations.
fn find_binary(name: &str, override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        if path.is_file() {
            return Some(path);
        }
        log::warn!("Configured {} path {} does not exist", name, path.display());
    }

    if let Ok(path) = which::which(name) {
        return Some(path);
    }

    let dirs: &[&str] = if cfg!(target_os = "macos") {
        &["/usr/local/bin", "/opt/homebrew/bin", "/opt/local/bin"]
    } else if cfg!(target_os = "windows") {
        &["C:\\ffmpeg\\bin", "C:\\Program Files\\ffmpeg\\bin"]
    } else {
        &["/usr/bin", "/usr/local/bin"]
    };
    let file_name = if cfg!(target_os = "windows") {
        format!("{}.exe", name)
    } else {
        name.to_string()
    };

    dirs.iter()
        .map(|dir| Path::new(dir).join(&file_name))
        .find(|p| p.is_file())
}

/// Arguments shared by every write: overwrite, machine-readable progress.
fn base_args(clip: &VideoClip) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-hide_banner", "-nostats", "-y", "-progress", "pipe:1", "-i"]
        .iter()
        .map(OsString::from)
        .collect();
    args.push(clip.path.clone().into_os_string());
    args
}

fn gif_args(clip: &VideoClip, output: &Path) -> Vec<OsString> {
    let mut args = base_args(clip);
    args.extend(
        ["-vf", GIF_FILTER, "-loop", "0", "-an"]
            .iter()
            .map(OsString::from),
    );
    args.push(output.as_os_str().to_os_string());
    args
}

fn video_args(clip: &VideoClip, output: &Path, codec: &str) -> Vec<OsString> {
    let mut args = base_args(clip);
    args.extend(["-c:v", codec].iter().map(OsString::from));
    if codec == "libx264" {
        args.extend(["-pix_fmt", "yuv420p"].iter().map(OsString::from));
    }

    if clip.has_audio {
        let is_mp4 = output
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("mp4"));
        let audio_codec = if is_mp4 { "aac" } else { "libmp3lame" };
        args.extend(["-c:a", audio_codec].iter().map(OsString::from));
    } else {
        args.push(OsString::from("-an"));
    }

    args.push(output.as_os_str().to_os_string());
    args
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    r_frame_rate: Option<String>,
    avg_frame_rate: Option<String>,
    nb_frames: Option<String>,
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

/// Build clip metadata from `ffprobe -print_format json` output.
fn parse_probe_output(path: &Path, json: &str) -> Result<VideoClip, EncodeError> {
    let probe: ProbeOutput =
        serde_json::from_str(json).map_err(|e| EncodeError::Probe(e.to_string()))?;

    let video = probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| EncodeError::NoVideoStream(path.to_path_buf()))?;
    let has_audio = probe
        .streams
        .iter()
        .any(|s| s.codec_type.as_deref() == Some("audio"));

    let duration_seconds = probe
        .format
        .as_ref()
        .and_then(|f| parse_number(f.duration.as_deref()))
        .or_else(|| parse_number(video.duration.as_deref()))
        .unwrap_or(0.0);

    let frame_rate = video
        .avg_frame_rate
        .as_deref()
        .and_then(parse_rate)
        .or_else(|| video.r_frame_rate.as_deref().and_then(parse_rate))
        .unwrap_or(0.0);

    let total_frames = video
        .nb_frames
        .as_deref()
        .and_then(|n| n.trim().parse::<u64>().ok())
        .filter(|n| *n > 0)
        .unwrap_or_else(|| (duration_seconds * frame_rate).round() as u64);

    Ok(VideoClip {
        path: path.to_path_buf(),
        duration_seconds,
        frame_rate,
        total_frames,
        has_audio,
    })
}

fn parse_number(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Parse an FFprobe rational such as `30000/1001`.
fn parse_rate(rate: &str) -> Option<f64> {
    let (num, den) = rate.trim().split_once('/')?;
    let (n, d) = (num.parse::<f64>().ok()?, den.parse::<f64>().ok()?);
    if n > 0.0 && d > 0.0 {
        Some(n / d)
    } else {
        None
    }
}

/// Which bar the FFmpeg progress stream is reported on.
#[derive(Debug, Clone, Copy, PartialEq)]
enum BarMode {
    /// Frame count is known
    Frames(u64),
    /// Only the duration is known
    Time(f64),
    /// Nothing to measure against
    Unknown,
}

/// Turns FFmpeg `key=value` progress lines into bar notifications.
struct ProgressParser {
    mode: BarMode,
}

impl ProgressParser {
    fn new(clip: &VideoClip) -> Self {
        let mode = if clip.total_frames > 0 {
            BarMode::Frames(clip.total_frames)
        } else if clip.duration_seconds > 0.0 {
            BarMode::Time(clip.duration_seconds)
        } else {
            BarMode::Unknown
        };
        Self { mode }
    }

    /// Report the bar's size before any progress arrives.
    fn announce(&self, hook: &mut dyn ProgressHook) {
        match self.mode {
            BarMode::Frames(total) => hook.bars_callback(FRAME_BAR, "total", 0.0, Some(total as f64)),
            BarMode::Time(total) => hook.bars_callback(TIME_BAR, "total", 0.0, Some(total)),
            BarMode::Unknown => {}
        }
    }

    /// Handle one line. Returns true once FFmpeg reports `progress=end`.
    fn feed(&mut self, line: &str, hook: &mut dyn ProgressHook) -> bool {
        let Some((key, value)) = line.trim().split_once('=') else {
            return false;
        };
        let value = value.trim();

        match (key, self.mode) {
            ("frame", BarMode::Frames(_)) => {
                if let Ok(frame) = value.parse::<u64>() {
                    hook.bars_callback(FRAME_BAR, "index", frame as f64, None);
                }
            }
            ("out_time_us", BarMode::Time(_)) => {
                if let Ok(us) = value.parse::<i64>() {
                    hook.bars_callback(TIME_BAR, "index", us as f64 / 1_000_000.0, None);
                }
            }
            ("progress", mode) if value == "end" => {
                match mode {
                    BarMode::Frames(total) => hook.bars_callback(FRAME_BAR, "index", total as f64, None),
                    BarMode::Time(total) => hook.bars_callback(TIME_BAR, "index", total, None),
                    BarMode::Unknown => {}
                }
                return true;
            }
            _ => {}
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROBE_JSON: &str = r#"{
        "streams": [
            {
                "index": 0,
                "codec_name": "h264",
                "codec_type": "video",
                "width": 1920,
                "height": 1080,
                "r_frame_rate": "30000/1001",
                "avg_frame_rate": "30000/1001",
                "duration": "10.010000",
                "nb_frames": "300"
            },
            {
                "index": 1,
                "codec_name": "aac",
                "codec_type": "audio",
                "r_frame_rate": "0/0",
                "avg_frame_rate": "0/0"
            }
        ],
        "format": {
            "filename": "clip.mov",
            "duration": "10.026667"
        }
    }"#;

    #[derive(Default)]
    struct Recorder(Vec<(String, String, f64, Option<f64>)>);

    impl ProgressHook for Recorder {
        fn bars_callback(&mut self, bar: &str, attr: &str, value: f64, total: Option<f64>) {
            self.0.push((bar.to_string(), attr.to_string(), value, total));
        }
    }

    fn clip(total_frames: u64, duration_seconds: f64, has_audio: bool) -> VideoClip {
        VideoClip {
            path: PathBuf::from("/videos/clip.mov"),
            duration_seconds,
            frame_rate: 25.0,
            total_frames,
            has_audio,
        }
    }

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().to_string()).collect()
    }

    #[test]
    fn test_parse_probe_output() {
        let clip = parse_probe_output(Path::new("clip.mov"), PROBE_JSON).unwrap();
        assert_eq!(clip.total_frames, 300);
        assert!((clip.frame_rate - 29.97).abs() < 0.01);
        assert!((clip.duration_seconds - 10.026667).abs() < 1e-6);
        assert!(clip.has_audio);
    }

    #[test]
    fn test_parse_probe_estimates_frames_from_duration() {
        let json = r#"{
            "streams": [{"codec_type": "video", "r_frame_rate": "25/1"}],
            "format": {"duration": "4.0"}
        }"#;
        let clip = parse_probe_output(Path::new("a.webm"), json).unwrap();
        assert_eq!(clip.total_frames, 100);
        assert!(!clip.has_audio);
    }

    #[test]
    fn test_parse_probe_requires_video_stream() {
        let json = r#"{"streams": [{"codec_type": "audio"}], "format": {"duration": "3.0"}}"#;
        let err = parse_probe_output(Path::new("song.mp3"), json).unwrap_err();
        assert!(matches!(err, EncodeError::NoVideoStream(_)));
    }

    #[test]
    fn test_parse_probe_rejects_garbage() {
        let err = parse_probe_output(Path::new("x"), "not json").unwrap_err();
        assert!(matches!(err, EncodeError::Probe(_)));
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate("25/1"), Some(25.0));
        assert_eq!(parse_rate("0/0"), None);
        assert_eq!(parse_rate("30"), None);
    }

    #[test]
    fn test_gif_args() {
        let args = strings(&gif_args(&clip(10, 1.0, true), Path::new("/videos/clip_converted.gif")));
        assert_eq!(args.first().map(String::as_str), Some("-hide_banner"));
        assert!(args.windows(2).any(|w| w == ["-vf", GIF_FILTER]));
        assert!(args.contains(&"-an".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("/videos/clip_converted.gif"));
    }

    #[test]
    fn test_video_args_by_codec() {
        let mp4 = strings(&video_args(
            &clip(10, 1.0, true),
            Path::new("/v/clip_converted.mp4"),
            "libx264",
        ));
        assert!(mp4.windows(2).any(|w| w == ["-c:v", "libx264"]));
        assert!(mp4.windows(2).any(|w| w == ["-pix_fmt", "yuv420p"]));
        assert!(mp4.windows(2).any(|w| w == ["-c:a", "aac"]));

        let avi = strings(&video_args(
            &clip(10, 1.0, false),
            Path::new("/v/clip_converted.avi"),
            "png",
        ));
        assert!(avi.windows(2).any(|w| w == ["-c:v", "png"]));
        assert!(!avi.contains(&"-pix_fmt".to_string()));
        assert!(avi.contains(&"-an".to_string()));
    }

    #[test]
    fn test_progress_parser_frames() {
        let mut parser = ProgressParser::new(&clip(50, 2.0, false));
        let mut hook = Recorder::default();
        parser.announce(&mut hook);

        let lines = [
            "frame=10", "fps=0.0", "out_time_us=400000", "progress=continue",
            "frame=40", "speed=2.1x", "progress=continue",
            "frame=50", "progress=end",
        ];
        let mut ended = false;
        for line in lines {
            ended = parser.feed(line, &mut hook);
        }

        assert!(ended);
        let values: Vec<_> = hook.0.iter().map(|(_, _, v, t)| (*v, *t)).collect();
        assert_eq!(
            values,
            vec![(0.0, Some(50.0)), (10.0, None), (40.0, None), (50.0, None), (50.0, None)]
        );
        assert!(hook.0.iter().all(|(bar, ..)| bar == FRAME_BAR));
    }

    #[test]
    fn test_progress_parser_time_fallback() {
        let mut parser = ProgressParser::new(&clip(0, 4.0, false));
        let mut hook = Recorder::default();
        parser.announce(&mut hook);
        parser.feed("frame=12", &mut hook);
        parser.feed("out_time_us=2000000", &mut hook);

        assert_eq!(
            hook.0,
            vec![
                (TIME_BAR.to_string(), "total".to_string(), 0.0, Some(4.0)),
                (TIME_BAR.to_string(), "index".to_string(), 2.0, None),
            ]
        );
    }

    #[test]
    fn test_progress_parser_unknown_length_is_silent() {
        let mut parser = ProgressParser::new(&clip(0, 0.0, false));
        let mut hook = Recorder::default();
        parser.announce(&mut hook);
        parser.feed("frame=12", &mut hook);
        assert!(parser.feed("progress=end", &mut hook));
        assert!(hook.0.is_empty());
    }

    #[test]
    fn test_missing_input_checked_before_probe() {
        let dir = tempfile::tempdir().unwrap();
        let encoder = FfmpegEncoder {
            ffmpeg_path: None,
            ffprobe_path: None,
        };
        let err = encoder.load_clip(&dir.path().join("nope.mov")).unwrap_err();
        assert!(matches!(err, EncodeError::InputMissing(_)));
        assert!(encoder.availability_error().is_some());
    }

    #[test]
    fn test_override_path_is_preferred() {
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("my-ffmpeg");
        std::fs::write(&fake, b"").unwrap();
        assert_eq!(find_binary("ffmpeg", Some(fake.clone())), Some(fake));
    }

    #[test]
    fn test_failure_detail_skips_generic_line() {
        let tail: VecDeque<String> = [
            "Stream mapping:",
            "Unknown encoder 'libx264'",
            "Error selecting an encoder",
            "Conversion failed!",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(
            failure_detail(&tail, Some(1)),
            "Stream mapping:; Unknown encoder 'libx264'; Error selecting an encoder"
        );
    }

    #[test]
    fn test_failure_detail_without_stderr() {
        let only_generic: VecDeque<String> = VecDeque::from(vec![GENERIC_FAILURE.to_string()]);
        assert_eq!(failure_detail(&only_generic, Some(1)), "FFmpeg exited with code: Some(1)");
        assert_eq!(failure_detail(&VecDeque::new(), None), "FFmpeg exited with code: None");
    }

    #[test]
    fn test_spawn_failure_is_reported_as_spawn() {
        let dir = tempfile::tempdir().unwrap();
        let encoder = FfmpegEncoder {
            ffmpeg_path: Some(dir.path().join("not-installed")),
            ffprobe_path: None,
        };
        let mut hook = Recorder::default();
        let err = encoder
            .write_video(&clip(10, 0.4, false), &dir.path().join("out.mp4"), "libx264", &mut hook)
            .unwrap_err();
        assert!(matches!(err, EncodeError::Spawn(_)));
    }

    /// Write an executable shell script standing in for FFmpeg.
    #[cfg(unix)]
    fn fake_ffmpeg(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("ffmpeg");
        std::fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

        // Another test thread may still hold the write handle across a fork
        // (ETXTBSY); wait until the script can be executed.
        for _ in 0..100 {
            if Command::new(&path).stdout(Stdio::null()).stderr(Stdio::null()).status().is_ok() {
                break;
            }
            thread::sleep(std::time::Duration::from_millis(20));
        }
        path
    }

    #[cfg(unix)]
    const SUCCESS_SCRIPT: &str = r#"for arg; do out="$arg"; done
printf 'frame=5\nprogress=continue\n'
printf 'frame=10\nprogress=end\n'
[ -n "$out" ] && printf 'encoded' > "$out"
exit 0
"#;

    #[cfg(unix)]
    #[test]
    fn test_write_video_runs_ffmpeg_and_reports_frames() {
        let dir = tempfile::tempdir().unwrap();
        let encoder = FfmpegEncoder {
            ffmpeg_path: Some(fake_ffmpeg(dir.path(), SUCCESS_SCRIPT)),
            ffprobe_path: None,
        };
        let output = dir.path().join("clip_converted.mp4");
        let mut hook = Recorder::default();

        encoder
            .write_video(&clip(10, 0.4, true), &output, "libx264", &mut hook)
            .unwrap();

        assert_eq!(std::fs::read(&output).unwrap(), b"encoded");
        let events: Vec<(f64, Option<f64>)> = hook.0.iter().map(|e| (e.2, e.3)).collect();
        assert_eq!(events, vec![(0.0, Some(10.0)), (5.0, None), (10.0, None), (10.0, None)]);
        assert!(hook.0.iter().all(|e| e.0 == FRAME_BAR));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_gif_runs_ffmpeg() {
        let dir = tempfile::tempdir().unwrap();
        let encoder = FfmpegEncoder {
            ffmpeg_path: Some(fake_ffmpeg(dir.path(), SUCCESS_SCRIPT)),
            ffprobe_path: None,
        };
        let output = dir.path().join("clip_converted.gif");
        let mut hook = Recorder::default();

        encoder.write_gif(&clip(10, 0.4, false), &output, &mut hook).unwrap();

        assert!(output.is_file());
        assert_eq!(hook.0.first().map(|e| e.3), Some(Some(10.0)));
        assert_eq!(hook.0.last().map(|e| e.2), Some(10.0));
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_run_quotes_the_cause() {
        let dir = tempfile::tempdir().unwrap();
        let script = r#"echo "Unknown encoder 'libx264'" >&2
echo "Error selecting an encoder" >&2
echo "Conversion failed!" >&2
exit 1
"#;
        let encoder = FfmpegEncoder {
            ffmpeg_path: Some(fake_ffmpeg(dir.path(), script)),
            ffprobe_path: None,
        };
        let mut hook = Recorder::default();

        let err = encoder
            .write_video(&clip(10, 0.4, false), &dir.path().join("out.mp4"), "libx264", &mut hook)
            .unwrap_err();

        assert!(matches!(err, EncodeError::Failed(_)));
        assert_eq!(
            err.to_string(),
            "Encoding failed: Unknown encoder 'libx264'; Error selecting an encoder"
        );
    }
}
