//! Native window for the scaler.
//!
//! | Sub-module      | Responsibility |
//! | --------------- | -------------- |
//! | [`scaler_app`]  | [`ScalerApp`] (eframe) wrapper: pumps results, renders tabs |
//! | [`run`]         | [`run_scaler()`] entry point and icon loading |

mod run;
mod scaler_app;

pub use run::run_scaler;
pub use scaler_app::ScalerApp;
