//! Main application window.
//!
//! Every frame is drawn from a snapshot of the shared converter state, so
//! button enablement and progress visibility follow the conversion phase.

use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui::{self, Color32, RichText};

use crate::converter::state::lock_state;
use crate::converter::{
    save_converted, ConversionWorker, ConverterState, FfmpegEncoder, MediaEncoder, OutputFormat,
    RepaintFn, SharedState, StartError, StateSnapshot,
};
use crate::settings::Settings;

/// Repaint interval while something on screen is time-dependent.
const ACTIVE_REPAINT: Duration = Duration::from_millis(100);

/// Main application state
pub struct VideoConverterApp {
    state: SharedState,
    worker: ConversionWorker,
    /// Shown at the top when FFmpeg/FFprobe could not be found
    encoder_warning: Option<String>,
}

impl VideoConverterApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        log::info!("Initializing Video Converter...");

        let encoder = FfmpegEncoder::new(settings.ffmpeg_path.clone(), settings.ffprobe_path.clone());
        let encoder_warning = encoder.availability_error();

        let ctx = cc.egui_ctx.clone();
        let repaint: RepaintFn = Arc::new(move || ctx.request_repaint());

        let mut app = Self::with_encoder(&settings, Arc::new(encoder), repaint);
        app.encoder_warning = encoder_warning;
        app
    }

    /// Build the app around any encoder.
    pub fn with_encoder(
        settings: &Settings,
        encoder: Arc<dyn MediaEncoder>,
        repaint: RepaintFn,
    ) -> Self {
        let state = ConverterState::new(settings.notification_duration()).shared();
        let worker = ConversionWorker::new(Arc::clone(&state), encoder, repaint);
        Self {
            state,
            worker,
            encoder_warning: None,
        }
    }

    /// Shared state handle.
    pub fn state(&self) -> &SharedState {
        &self.state
    }

    /// Convert button handler.
    pub fn convert_clicked(&mut self) -> Result<(), StartError> {
        self.worker.start()
    }

    /// Show window contents.
    fn show_contents(&mut self, ui: &mut egui::Ui, snap: &StateSnapshot) {
        if let Some(ref warning) = self.encoder_warning {
            ui.horizontal(|ui| {
                ui.label(RichText::new("⚠").color(Color32::YELLOW));
                ui.label(RichText::new(warning).color(Color32::YELLOW).small());
            });
            ui.separator();
        }

        ui.heading("Video Converter");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("Select a video file:");
            if ui.button("Choose File").clicked() {
                self.open_file_dialog();
            }
        });
        ui.label(snap.file_label.as_str());

        ui.add_space(8.0);
        ui.label("Select output format:");
        self.show_format_dropdown(ui, snap.format);

        ui.add_space(8.0);
        if ui
            .add_enabled(snap.convert_enabled, egui::Button::new("Convert"))
            .clicked()
        {
            if let Err(e) = self.convert_clicked() {
                log::debug!("Convert rejected: {}", e);
            }
        }

        if ui
            .add_enabled(snap.download_enabled, egui::Button::new("Download"))
            .clicked()
        {
            self.open_save_dialog();
        }

        ui.label(snap.status.as_str());

        if let Some(progress) = snap.progress {
            ui.add(egui::ProgressBar::new(progress).desired_width(300.0));
        }
    }

    /// Format dropdown.
    fn show_format_dropdown(&mut self, ui: &mut egui::Ui, current: Option<OutputFormat>) {
        let selected_text = current.map(|f| f.display_name()).unwrap_or("");
        egui::ComboBox::from_id_source("output_format")
            .selected_text(selected_text)
            .width(150.0)
            .show_ui(ui, |ui| {
                for format in OutputFormat::all() {
                    if ui
                        .selectable_label(current == Some(*format), format.display_name())
                        .clicked()
                    {
                        lock_state(&self.state).select_format(*format);
                    }
                }
            });
    }

    /// Transient notification along the bottom edge.
    fn show_notification(ctx: &egui::Context, message: &str) {
        egui::TopBottomPanel::bottom("notification").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.label(RichText::new(message).strong());
            ui.add_space(4.0);
        });
    }

    /// Open file dialog to choose the input video.
    fn open_file_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("All Files", &["*"])
            .pick_file()
        {
            log::info!("Selected {}", path.display());
            lock_state(&self.state).select_input(path);
        }
    }

    /// Ask where to save the converted file and copy it there.
    fn open_save_dialog(&mut self) {
        let Some(source) = lock_state(&self.state).download_source() else {
            return;
        };

        let mut dialog = rfd::FileDialog::new();
        if let Some(name) = source.file_name() {
            dialog = dialog.set_file_name(name.to_string_lossy());
        }

        let Some(destination) = dialog.save_file() else {
            return;
        };

        let result = save_converted(&source, &destination);
        if let Err(ref e) = result {
            log::error!("Failed to save {}: {}", destination.display(), e);
        }
        lock_state(&self.state).record_save(&result);
    }
}

impl eframe::App for VideoConverterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let snap = lock_state(&self.state).snapshot(Instant::now());

        if let Some(ref message) = snap.notification {
            Self::show_notification(ctx, message);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_contents(ui, &snap);
        });

        if snap.progress.is_some() || snap.notification.is_some() {
            ctx.request_repaint_after(ACTIVE_REPAINT);
        }
    }
}
