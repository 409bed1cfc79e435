//! Background conversion worker.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::encoder::{transcode, MediaEncoder};
use super::progress::ProgressAdapter;
use super::state::{lock_state, ConversionRequest, Phase, SharedState, StartError};

/// Asks the UI to redraw. Called from the worker thread.
pub type RepaintFn = Arc<dyn Fn() + Send + Sync>;

/// Runs one conversion at a time on its own thread so the UI stays
/// responsive.
pub struct ConversionWorker {
    state: SharedState,
    encoder: Arc<dyn MediaEncoder>,
    repaint: RepaintFn,
    worker_handle: Option<JoinHandle<()>>,
}

impl ConversionWorker {
    pub fn new(state: SharedState, encoder: Arc<dyn MediaEncoder>, repaint: RepaintFn) -> Self {
        Self {
            state,
            encoder,
            repaint,
            worker_handle: None,
        }
    }

    /// Validate the current selection and start converting it.
    ///
    /// Nothing is spawned when the selection is incomplete or a conversion
    /// is already running.
    pub fn start(&mut self) -> Result<(), StartError> {
        let request = lock_state(&self.state).begin_conversion();
        (self.repaint)();

        let request = match request {
            Ok(request) => request,
            Err(e) => {
                log::warn!("Conversion not started: {}", e);
                return Err(e);
            }
        };

        // The previous run already reported back; reap its thread.
        self.join();

        log::info!(
            "Converting {} -> {} ({})",
            request.input.display(),
            request.output.display(),
            request.format.display_name()
        );

        let state = Arc::clone(&self.state);
        let encoder = Arc::clone(&self.encoder);
        let repaint = Arc::clone(&self.repaint);

        let spawned = thread::Builder::new()
            .name("converter-worker".to_string())
            .spawn(move || run_conversion(&state, encoder.as_ref(), &repaint, request));

        match spawned {
            Ok(handle) => self.worker_handle = Some(handle),
            Err(e) => {
                log::error!("Failed to spawn conversion thread: {}", e);
                lock_state(&self.state).finish_conversion(Err(e.to_string()));
                (self.repaint)();
            }
        }
        Ok(())
    }

    /// Whether a conversion is in progress.
    pub fn is_running(&self) -> bool {
        lock_state(&self.state).phase() == Phase::Running
    }

    /// Block until the current worker thread (if any) exits.
    pub fn join(&mut self) {
        if let Some(handle) = self.worker_handle.take() {
            if handle.join().is_err() {
                log::error!("Conversion thread panicked");
            }
        }
    }
}

impl Drop for ConversionWorker {
    fn drop(&mut self) {
        // A running conversion is left to finish on its own.
        if !self.is_running() {
            self.join();
        }
    }
}

/// Worker thread body: transcode, then always return the state to idle.
fn run_conversion(
    state: &SharedState,
    encoder: &dyn MediaEncoder,
    repaint: &RepaintFn,
    request: ConversionRequest,
) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut adapter = ProgressAdapter::new(|fraction| {
            lock_state(state).set_progress(fraction);
            repaint();
        });
        transcode(
            encoder,
            &request.input,
            &request.output,
            request.format,
            &mut adapter,
        )
    }));

    let result = match outcome {
        Ok(Ok(())) => {
            log::info!("Conversion finished: {}", request.output.display());
            Ok(request.output)
        }
        Ok(Err(e)) => {
            log::error!("Conversion failed: {}", e);
            Err(e.to_string())
        }
        Err(_) => {
            log::error!("Encoder panicked while converting {}", request.input.display());
            Err("encoder stopped unexpectedly".to_string())
        }
    };

    lock_state(state).finish_conversion(result);
    repaint();
}
