//! Glue between the controller and the background worker.
//!
//! [`ScalerSession`] is what panels operate on: they mutate the controller and
//! pass the returned [`Trigger`] to [`ScalerSession::dispatch`]. The app calls
//! [`ScalerSession::pump`] once per frame to apply finished calculations.

use std::sync::Arc;

use crate::config::ScalerConfig;
use crate::controller::{ScalingController, Trigger};
use crate::data::history::HistoryLog;
use crate::persistence::{FileStore, HistoryStore};
use crate::service::{CalcWorker, LocalScaler, ScalingService};
#[cfg(feature = "grpc")]
use crate::service::UnavailableScaler;

pub struct ScalerSession {
    pub controller: ScalingController,
    worker: CalcWorker,
}

impl ScalerSession {
    pub fn new(controller: ScalingController, worker: CalcWorker) -> Self {
        Self { controller, worker }
    }

    /// Build a session from configuration: file-backed history and the
    /// configured service (local engine unless a remote endpoint is set).
    pub fn from_config(cfg: &ScalerConfig) -> Self {
        let store: Box<dyn HistoryStore> = match &cfg.history.dir {
            Some(dir) => Box::new(FileStore::new(dir.clone())),
            None => Box::new(FileStore::default()),
        };
        let history = HistoryLog::new(cfg.history.clone(), store);
        let controller = ScalingController::new(history);
        let worker = CalcWorker::new(service_from_config(cfg));
        Self::new(controller, worker)
    }

    /// Replace the worker, e.g. to attach a repaint waker once a UI context exists.
    pub fn set_worker(&mut self, worker: CalcWorker) {
        self.worker = worker;
    }

    pub fn service(&self) -> &Arc<dyn ScalingService> {
        self.worker.service()
    }

    /// Send the request carried by `trigger`, if any, to the worker.
    pub fn dispatch(&mut self, trigger: Trigger) {
        if let Trigger::Dispatched(request) = trigger {
            self.worker.dispatch(request);
        }
    }

    /// Apply every finished calculation. Returns `true` if anything was applied.
    pub fn pump(&mut self) -> bool {
        let mut applied = false;
        while let Some((request, result)) = self.worker.poll() {
            self.controller.complete(request, result);
            applied = true;
        }
        applied
    }
}

#[cfg(feature = "grpc")]
fn service_from_config(cfg: &ScalerConfig) -> Arc<dyn ScalingService> {
    if let Some(endpoint) = &cfg.service.endpoint {
        match crate::grpc::RemoteScaler::new(endpoint.clone()) {
            Ok(remote) => Arc::new(remote),
            Err(e) => {
                log::error!("Cannot use remote scaler {endpoint}: {e}");
                Arc::new(UnavailableScaler::new(e.to_string()))
            }
        }
    } else {
        Arc::new(LocalScaler)
    }
}

#[cfg(not(feature = "grpc"))]
fn service_from_config(cfg: &ScalerConfig) -> Arc<dyn ScalingService> {
    if let Some(endpoint) = &cfg.service.endpoint {
        log::warn!("Remote endpoint {endpoint} ignored: built without the `grpc` feature");
    }
    Arc::new(LocalScaler)
}
