//! Video Converter - pick a video, convert it to MP4/AVI/GIF, save a copy.
//!
//! Main entry point for the application.

use video_converter::settings::MIN_WINDOW_SIZE;
use video_converter::{Settings, VideoConverterApp};

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("Starting Video Converter v{}", env!("CARGO_PKG_VERSION"));

    let settings = Settings::load();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(settings.window_size())
            .with_min_inner_size(MIN_WINDOW_SIZE)
            .with_title("Video Converter App"),
        ..Default::default()
    };

    eframe::run_native(
        "Video Converter",
        native_options,
        Box::new(move |cc| Box::new(VideoConverterApp::new(cc, settings))),
    )
}
