use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axis_scaler::*;

fn wait_for<T>(mut f: impl FnMut() -> Option<T>) -> T {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(v) = f() {
            return v;
        }
        assert!(Instant::now() < deadline, "timed out waiting for worker");
        std::thread::sleep(Duration::from_millis(5));
    }
}

fn session() -> ScalerSession {
    let history = HistoryLog::new(HistoryConfig::default(), Box::new(MemoryStore::new()));
    let controller = ScalingController::new(history);
    ScalerSession::new(controller, CalcWorker::new(Arc::new(LocalScaler)))
}

#[test]
fn worker_returns_request_and_result() {
    let wakes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&wakes);
    let worker = CalcWorker::new(Arc::new(LocalScaler)).with_waker(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let ranges = AxisRanges::new(("0", "10"), ("0", "100"), ("", ""));
    let req = ScalingRequest::new(&AxisValues::new("5", "", ""), &ranges, Axis::X, false);
    worker.dispatch(req.clone());

    let (sent, result) = wait_for(|| worker.poll());
    assert_eq!(sent, req);
    assert_eq!(result.unwrap().y, "50");
    wait_for(|| (wakes.load(Ordering::SeqCst) == 1).then_some(()));
}

#[test]
fn session_applies_background_result() {
    let mut s = session();
    for b in RangeBound::ALL {
        s.controller.set_range(b, if b.is_min() { "0" } else { "10" });
    }
    s.controller.set_axis_value(Axis::X, "4");
    let t = s.controller.trigger_calculation();
    s.dispatch(t);
    assert!(s.controller.is_in_flight());
    // guard holds until the result is pumped
    assert_eq!(s.controller.trigger_calculation(), Trigger::Busy);

    wait_for(|| s.pump().then_some(()));

    assert!(!s.controller.is_in_flight());
    assert_eq!(s.controller.axis_values(), &AxisValues::new("4", "4", "4"));
    assert_eq!(s.controller.history().len(), 1);
}

#[test]
fn cleared_trigger_dispatches_nothing() {
    let mut s = session();
    let t = s.controller.trigger_calculation();
    assert_eq!(t, Trigger::Cleared);
    s.dispatch(t);
    std::thread::sleep(Duration::from_millis(20));
    assert!(!s.pump());
}

#[test]
fn unavailable_service_reports_transport_error() {
    let svc = axis_scaler::service::UnavailableScaler::new("no endpoint");
    let err = svc.scale(&ScalingRequest::default()).unwrap_err();
    assert_eq!(err, ScaleError::Transport("no endpoint".to_string()));
}
