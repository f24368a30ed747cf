//! Interaction controller: owns the calculator state and decides when to call
//! the scaling service.
//!
//! Edits to ranges and axis values only update state and notify listeners.
//! A calculation is started by [`ScalingController::trigger_calculation`],
//! which the UI calls on Enter/Calculate and which [`select_axis`] and
//! [`set_z_in_hex`] call themselves after applying their change. Only one
//! calculation may be in flight; triggers issued meanwhile are dropped.
//!
//! The service call itself happens outside the controller. A trigger returns
//! the request to send ([`Trigger::Dispatched`]) and the caller feeds the outcome
//! back through [`ScalingController::complete`], either right away
//! ([`calculate_with`]) or later from a [`CalcWorker`](crate::service::CalcWorker).
//!
//! [`select_axis`]: ScalingController::select_axis
//! [`set_z_in_hex`]: ScalingController::set_z_in_hex
//! [`calculate_with`]: ScalingController::calculate_with

use std::sync::mpsc::{self, Receiver, Sender};

use crate::data::axis::{parse_axis_input, Axis, AxisRanges, AxisValues, RangeBound};
use crate::data::history::HistoryLog;
use crate::data::scaling::{ScalingRequest, ScalingResponse};
use crate::error::ScaleError;
use crate::service::ScalingService;

/// Which view of the dialog is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveTab {
    #[default]
    Calculator,
    History,
}

/// Everything a listener needs to mirror the calculator inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalingSnapshot {
    pub ranges: AxisRanges,
    pub selected_axis: Axis,
    pub axis_values: AxisValues,
    pub z_in_hex: bool,
}

/// Outcome of a calculation trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// A calculation is already in flight; this trigger was dropped.
    Busy,
    /// The selected axis value was blank or not a number; values were cleared.
    Cleared,
    /// A request must be sent; report its outcome via `complete`.
    Dispatched(ScalingRequest),
}

impl Trigger {
    pub fn request(&self) -> Option<&ScalingRequest> {
        match self {
            Trigger::Dispatched(r) => Some(r),
            _ => None,
        }
    }
}

pub struct ScalingController {
    ranges: AxisRanges,
    selected_axis: Axis,
    axis_values: AxisValues,
    z_in_hex: bool,
    in_flight: bool,
    last_error: Option<String>,
    active_tab: ActiveTab,
    history: HistoryLog,
    listeners: Vec<Sender<ScalingSnapshot>>,
}

impl ScalingController {
    /// Create a controller around `history`, loading its persisted entries.
    pub fn new(mut history: HistoryLog) -> Self {
        history.load();
        Self {
            ranges: AxisRanges::default(),
            selected_axis: Axis::X,
            axis_values: AxisValues::default(),
            z_in_hex: false,
            in_flight: false,
            last_error: None,
            active_tab: ActiveTab::default(),
            history,
            listeners: Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn ranges(&self) -> &AxisRanges {
        &self.ranges
    }

    pub fn selected_axis(&self) -> Axis {
        self.selected_axis
    }

    pub fn axis_values(&self) -> &AxisValues {
        &self.axis_values
    }

    pub fn z_in_hex(&self) -> bool {
        self.z_in_hex
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Message of the last failed calculation, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn active_tab(&self) -> ActiveTab {
        self.active_tab
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn snapshot(&self) -> ScalingSnapshot {
        ScalingSnapshot {
            ranges: self.ranges.clone(),
            selected_axis: self.selected_axis,
            axis_values: self.axis_values.clone(),
            z_in_hex: self.z_in_hex,
        }
    }

    /// Subscribe to snapshots published after every state change.
    pub fn subscribe(&mut self) -> Receiver<ScalingSnapshot> {
        let (tx, rx) = mpsc::channel();
        self.listeners.push(tx);
        rx
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Edits
    // ─────────────────────────────────────────────────────────────────────────

    /// Set one range bound. No validation happens here.
    pub fn set_range(&mut self, bound: RangeBound, text: impl Into<String>) {
        self.ranges.set(bound, text);
        self.notify();
    }

    /// Set the value of one axis. Does not start a calculation.
    pub fn set_axis_value(&mut self, axis: Axis, text: impl Into<String>) {
        self.axis_values.set(axis, text);
        self.notify();
    }

    /// Change the scale-from axis and recalculate from the stored values.
    pub fn select_axis(&mut self, axis: Axis) -> Trigger {
        self.selected_axis = axis;
        self.notify();
        self.trigger_calculation()
    }

    /// Toggle hex output for Z and recalculate from the stored values.
    pub fn set_z_in_hex(&mut self, z_in_hex: bool) -> Trigger {
        self.z_in_hex = z_in_hex;
        self.notify();
        self.trigger_calculation()
    }

    pub fn set_active_tab(&mut self, tab: ActiveTab) {
        self.active_tab = tab;
    }

    /// Empty the history, including its durable record.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Calculation
    // ─────────────────────────────────────────────────────────────────────────

    /// Start a calculation from the current state.
    pub fn trigger_calculation(&mut self) -> Trigger {
        if self.in_flight {
            log::debug!("Calculation already in flight; trigger dropped");
            return Trigger::Busy;
        }

        let axis = self.selected_axis;
        let input = self.axis_values.get(axis);
        if parse_axis_input(axis, input, self.z_in_hex).is_none() {
            self.axis_values = AxisValues::default();
            self.notify();
            return Trigger::Cleared;
        }

        self.in_flight = true;
        let request = ScalingRequest::new(&self.axis_values, &self.ranges, axis, self.z_in_hex);
        log::debug!("Dispatching scaling request from axis {axis}");
        Trigger::Dispatched(request)
    }

    /// Apply the outcome of a dispatched request and release the in-flight guard.
    pub fn complete(
        &mut self,
        request: ScalingRequest,
        result: Result<ScalingResponse, ScaleError>,
    ) {
        match result {
            Ok(response) => {
                self.axis_values = response.clone().into();
                self.last_error = None;
                self.notify();
                let axis = request.scale_from;
                self.history.record(
                    &request.ranges(),
                    axis,
                    request.input(axis),
                    &response,
                    request.z_in_hex,
                );
            }
            Err(e) => {
                log::warn!("Scaling calculation failed: {e}");
                self.axis_values = AxisValues::default();
                self.last_error = Some(e.to_string());
                self.notify();
            }
        }
        self.in_flight = false;
    }

    /// Trigger and, if a request is due, run it on `service` right away.
    pub fn calculate_with(&mut self, service: &dyn ScalingService) -> Trigger {
        let trigger = self.trigger_calculation();
        self.resolve_with(&trigger, service);
        trigger
    }

    /// Run the request carried by `trigger` (if any) on `service` and complete it.
    pub fn resolve_with(&mut self, trigger: &Trigger, service: &dyn ScalingService) {
        if let Trigger::Dispatched(request) = trigger {
            let result = service.scale(request);
            self.complete(request.clone(), result);
        }
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let snap = self.snapshot();
        self.listeners.retain(|s| s.send(snap.clone()).is_ok());
    }
}
