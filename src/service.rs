//! Scaling service seam and the background worker that drives it.
//!
//! The controller never computes anything itself; it hands a
//! [`ScalingRequest`] to a [`ScalingService`]. [`LocalScaler`] runs the engine
//! in-process, the `grpc` feature adds a remote client. [`CalcWorker`] runs one
//! request at a time off the UI thread and hands the result back through a
//! channel that the UI polls every frame.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use crate::data::scaling::{self, ScalingRequest, ScalingResponse};
use crate::error::ScaleError;

/// Computes scaled values for all three axes.
pub trait ScalingService: Send + Sync {
    fn scale(&self, request: &ScalingRequest) -> Result<ScalingResponse, ScaleError>;

    /// Short human-readable description for logs and the status line.
    fn describe(&self) -> String {
        "scaling service".to_string()
    }
}

/// In-process scaling engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalScaler;

impl ScalingService for LocalScaler {
    fn scale(&self, request: &ScalingRequest) -> Result<ScalingResponse, ScaleError> {
        scaling::scale(request)
    }

    fn describe(&self) -> String {
        "local engine".to_string()
    }
}

/// Service that fails every call, used when the configured service cannot be set up.
#[derive(Debug, Clone)]
pub struct UnavailableScaler {
    reason: String,
}

impl UnavailableScaler {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl ScalingService for UnavailableScaler {
    fn scale(&self, _request: &ScalingRequest) -> Result<ScalingResponse, ScaleError> {
        Err(ScaleError::Transport(self.reason.clone()))
    }

    fn describe(&self) -> String {
        "unavailable".to_string()
    }
}

/// A finished calculation: the request as sent and what came back.
pub type Completion = (ScalingRequest, Result<ScalingResponse, ScaleError>);

/// Runs scaling requests on a background thread.
pub struct CalcWorker {
    service: Arc<dyn ScalingService>,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    waker: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl CalcWorker {
    pub fn new(service: Arc<dyn ScalingService>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            service,
            tx,
            rx,
            waker: None,
        }
    }

    /// Callback invoked from the worker thread after a result is queued
    /// (typically `egui::Context::request_repaint`).
    pub fn with_waker(mut self, waker: impl Fn() + Send + Sync + 'static) -> Self {
        self.waker = Some(Arc::new(waker));
        self
    }

    pub fn service(&self) -> &Arc<dyn ScalingService> {
        &self.service
    }

    /// Start computing `request`. The result shows up in [`poll`](Self::poll).
    pub fn dispatch(&self, request: ScalingRequest) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        let waker = self.waker.clone();
        let job_request = request.clone();
        let spawned = std::thread::Builder::new()
            .name("scaling-request".to_string())
            .spawn(move || {
                let result = service.scale(&job_request);
                // receiver gone means the app is shutting down
                let _ = tx.send((job_request, result));
                if let Some(w) = waker {
                    w();
                }
            });
        if let Err(e) = spawned {
            log::error!("Failed to spawn scaling worker: {e}");
            let _ = self
                .tx
                .send((request, Err(ScaleError::Transport(format!("worker spawn failed: {e}")))));
        }
    }

    /// Next finished calculation, if any.
    pub fn poll(&self) -> Option<Completion> {
        self.rx.try_recv().ok()
    }
}
