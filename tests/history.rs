use axis_scaler::data::history::UNSET_BOUND;
use axis_scaler::persistence::{history_from_json, history_to_json};
use axis_scaler::*;

fn log_with(store: &MemoryStore, max_entries: usize) -> HistoryLog {
    let cfg = HistoryConfig {
        max_entries,
        ..HistoryConfig::default()
    };
    let mut log = HistoryLog::new(cfg, Box::new(store.clone()));
    log.load();
    log
}

fn response(x: &str) -> ScalingResponse {
    ScalingResponse {
        x: x.to_string(),
        y: "1".to_string(),
        z: "2".to_string(),
    }
}

fn ranges() -> AxisRanges {
    AxisRanges::new(("0", "10"), ("0", "100"), ("", ""))
}

#[test]
fn record_prepends_newest_first() {
    let store = MemoryStore::new();
    let mut log = log_with(&store, 100);
    log.record(&ranges(), Axis::X, "1", &response("1"), false);
    log.record(&ranges(), Axis::X, "2", &response("2"), false);
    assert_eq!(log.entries()[0].input_value, "2");
    assert_eq!(log.entries()[1].input_value, "1");
}

#[test]
fn blank_bounds_are_stored_as_placeholder() {
    let store = MemoryStore::new();
    let mut log = log_with(&store, 100);
    log.record(&ranges(), Axis::Y, "50", &response("5"), true);
    let e = &log.entries()[0];
    assert_eq!(e.z1, UNSET_BOUND);
    assert_eq!(e.z2, "-");
    assert_eq!(e.x2, "10");
    assert_eq!(e.selected_axis, Axis::Y);
    assert!(e.z_in_hex);
}

#[test]
fn full_history_evicts_exactly_the_oldest() {
    let store = MemoryStore::new();
    let mut log = log_with(&store, 100);
    for i in 0..100 {
        log.record(&ranges(), Axis::X, &i.to_string(), &response("0"), false);
    }
    assert_eq!(log.len(), 100);
    assert_eq!(log.entries().last().unwrap().input_value, "0");

    log.record(&ranges(), Axis::X, "100", &response("0"), false);

    assert_eq!(log.len(), 100);
    assert_eq!(log.entries()[0].input_value, "100");
    assert_eq!(log.entries().last().unwrap().input_value, "1");
}

#[test]
fn every_record_is_persisted() {
    let store = MemoryStore::new();
    let mut log = log_with(&store, 100);
    log.record(&ranges(), Axis::X, "3", &response("3"), false);
    let raw = store.get("scaling_history").unwrap();
    let persisted = history_from_json(&raw).unwrap();
    assert_eq!(persisted, log.entries());
}

#[test]
fn clear_removes_memory_and_storage() {
    let store = MemoryStore::new();
    let mut log = log_with(&store, 100);
    log.record(&ranges(), Axis::X, "3", &response("3"), false);
    log.clear();
    assert!(log.is_empty());
    assert!(store.get("scaling_history").is_none());

    let reloaded = log_with(&store, 100);
    assert!(reloaded.is_empty());
}

#[test]
fn corrupt_record_loads_as_empty() {
    let store = MemoryStore::new();
    store.insert("scaling_history", "{not json");
    let log = log_with(&store, 100);
    assert!(log.is_empty());
}

#[test]
fn load_truncates_to_cap() {
    let store = MemoryStore::new();
    let mut big = log_with(&store, 10);
    for i in 0..10 {
        big.record(&ranges(), Axis::X, &i.to_string(), &response("0"), false);
    }
    let small = log_with(&store, 4);
    assert_eq!(small.len(), 4);
    assert_eq!(small.entries()[0].input_value, "9");
}

#[test]
fn custom_storage_key_is_used() {
    let store = MemoryStore::new();
    let cfg = HistoryConfig {
        storage_key: "other".to_string(),
        ..HistoryConfig::default()
    };
    let mut log = HistoryLog::new(cfg, Box::new(store.clone()));
    log.record(&ranges(), Axis::X, "1", &response("1"), false);
    assert!(store.get("other").is_some());
    assert!(store.get("scaling_history").is_none());
}

#[test]
fn entry_json_uses_camel_case_keys() {
    let e = HistoryEntry::new(&ranges(), Axis::Z, "7f", &response("1"), true);
    let v = serde_json::to_value(&e).unwrap();
    assert_eq!(v["inputAxis"], "z");
    assert_eq!(v["inputValue"], "7f");
    assert_eq!(v["outputX"], "1");
    assert_eq!(v["selectedAxis"], "z");
    assert_eq!(v["zInHex"], true);
    assert_eq!(v["z1"], "-");
}

#[test]
fn timestamp_is_iso8601_utc() {
    let e = HistoryEntry::new(&ranges(), Axis::X, "1", &response("1"), false);
    assert!(e.timestamp.ends_with('Z'));
    assert!(chrono::DateTime::parse_from_rfc3339(&e.timestamp).is_ok());
}

#[test]
fn json_helpers_round_trip_a_sequence() {
    let entries = vec![
        HistoryEntry::new(&ranges(), Axis::X, "1", &response("1"), false),
        HistoryEntry::new(&ranges(), Axis::Y, "2", &response("2"), true),
    ];
    let txt = history_to_json(&entries).unwrap();
    assert_eq!(history_from_json(&txt).unwrap(), entries);
}

#[test]
fn whitespace_bounds_are_stored_as_placeholder() {
    let store = MemoryStore::new();
    let mut log = log_with(&store, 100);
    let ranges = AxisRanges::new(("0", "10"), ("  ", " "), ("0", "50"));
    let mut values = AxisValues::default();
    values.set(Axis::X, "5");
    let resp = scale(&ScalingRequest::new(&values, &ranges, Axis::X, false)).unwrap();
    assert_eq!(resp.y, "");

    log.record(&ranges, Axis::X, "5", &resp, false);
    let e = &log.entries()[0];
    assert_eq!(e.y1, UNSET_BOUND);
    assert_eq!(e.y2, UNSET_BOUND);
    assert_eq!(e.x1, "0");
    assert_eq!(e.output_z, "25");
}
