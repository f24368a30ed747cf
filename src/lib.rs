//! Axis scaler crate root: re-exports and module wiring.
//!
//! Maps a value on one axis (X, Y or Z) onto all three axes by linear
//! interpolation between per-axis ranges, with optional hex output for Z.
//!
//! - `data`: axis/range types, the scaling engine and the history log
//! - `controller`: calculator state and the calculation trigger logic
//! - `service`: the scaling service seam and background worker
//! - `persistence`: durable storage for the history
//! - `config`: window, history and service configuration
//! - `app` / `panels`: the egui/eframe dialog
//! - `grpc` (feature `grpc`): remote scaling client and server

pub mod app;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod panels;
pub mod persistence;
pub mod service;
pub mod session;

#[cfg(feature = "grpc")]
pub mod grpc;

// Public re-exports for a compact external API
pub use app::{run_scaler, ScalerApp};
pub use config::{HistoryConfig, ScalerConfig, ServiceConfig};
pub use controller::{ActiveTab, ScalingController, ScalingSnapshot, Trigger};
pub use data::axis::{Axis, AxisRanges, AxisValues, RangeBound};
pub use data::history::{HistoryEntry, HistoryLog};
pub use data::scaling::{scale, ScalingRequest, ScalingResponse};
pub use error::{ConfigError, ScaleError, StorageError};
pub use persistence::{FileStore, HistoryStore, MemoryStore};
pub use service::{CalcWorker, LocalScaler, ScalingService};
pub use session::ScalerSession;
