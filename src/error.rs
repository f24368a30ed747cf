//! Error types for scaling, history storage and configuration.

use thiserror::Error;

use crate::data::axis::Axis;

/// Errors produced by a [`ScalingService`](crate::service::ScalingService).
///
/// The local engine only produces the validation variants; `Rejected` and
/// `Transport` come from remote services.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScaleError {
    /// The input value on the scale-from axis is blank or not a number.
    #[error("invalid {axis} input: {value:?}")]
    InvalidInput { axis: Axis, value: String },

    /// A range bound needed for the computation is blank.
    #[error("range bound {bound} cannot be empty")]
    MissingRange { bound: &'static str },

    /// A range bound is present but not a number.
    #[error("invalid range value {bound}: {value:?}")]
    InvalidRange { bound: &'static str, value: String },

    /// The scale-from axis has `min == max`.
    #[error("input range of axis {axis} cannot be zero")]
    ZeroWidthRange { axis: Axis },

    /// A computed value overflowed to infinity or became NaN.
    #[error("result on axis {axis} is not a finite number")]
    NonFinite { axis: Axis },

    /// A finite result does not fit the integer range of hex output.
    #[error("value {value} on axis {axis} is out of range for hex output")]
    OutOfRange { axis: Axis, value: f64 },

    /// The service answered with a non-success status.
    #[error("scaling service rejected the request: {0}")]
    Rejected(String),

    /// The service could not be reached or answered garbage.
    #[error("scaling service transport failed: {0}")]
    Transport(String),
}

/// Errors from a [`HistoryStore`](crate::persistence::HistoryStore).
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("history storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("history record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors while loading a [`ScalerConfig`](crate::config::ScalerConfig) file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("config file is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
