//! Bounded, newest-first log of successful calculations.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::axis::{Axis, AxisRanges, RangeBound};
use super::scaling::ScalingResponse;
use crate::config::HistoryConfig;
use crate::persistence::{history_from_json, history_to_json, HistoryStore};

/// Placeholder stored for a range bound that was blank at calculation time.
pub const UNSET_BOUND: &str = "-";

/// One completed calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// ISO-8601 UTC timestamp with millisecond precision.
    pub timestamp: String,
    pub x1: String,
    pub x2: String,
    pub y1: String,
    pub y2: String,
    pub z1: String,
    pub z2: String,
    pub input_axis: Axis,
    pub input_value: String,
    pub output_x: String,
    pub output_y: String,
    pub output_z: String,
    pub selected_axis: Axis,
    pub z_in_hex: bool,
}

impl HistoryEntry {
    /// Build an entry stamped with the current time.
    pub fn new(
        ranges: &AxisRanges,
        input_axis: Axis,
        input_value: &str,
        outputs: &ScalingResponse,
        z_in_hex: bool,
    ) -> Self {
        let bound = |b: RangeBound| {
            let t = ranges.get(b);
            if t.trim().is_empty() {
                UNSET_BOUND.to_string()
            } else {
                t.to_string()
            }
        };
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            x1: bound(RangeBound::X1),
            x2: bound(RangeBound::X2),
            y1: bound(RangeBound::Y1),
            y2: bound(RangeBound::Y2),
            z1: bound(RangeBound::Z1),
            z2: bound(RangeBound::Z2),
            input_axis,
            input_value: input_value.to_string(),
            output_x: outputs.x.clone(),
            output_y: outputs.y.clone(),
            output_z: outputs.z.clone(),
            selected_axis: input_axis,
            z_in_hex,
        }
    }

    /// Stored text of one bound (may be [`UNSET_BOUND`]).
    pub fn bound(&self, bound: RangeBound) -> &str {
        match bound {
            RangeBound::X1 => &self.x1,
            RangeBound::X2 => &self.x2,
            RangeBound::Y1 => &self.y1,
            RangeBound::Y2 => &self.y2,
            RangeBound::Z1 => &self.z1,
            RangeBound::Z2 => &self.z2,
        }
    }
}

/// In-memory history plus its durable record.
pub struct HistoryLog {
    config: HistoryConfig,
    store: Box<dyn HistoryStore>,
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    /// Create an empty log. Call [`load`](Self::load) to adopt the persisted sequence.
    pub fn new(config: HistoryConfig, store: Box<dyn HistoryStore>) -> Self {
        Self {
            config,
            store,
            entries: Vec::new(),
        }
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Replace the in-memory sequence with the persisted one.
    ///
    /// Missing, unreadable or corrupt records leave the log empty.
    pub fn load(&mut self) {
        let key = &self.config.storage_key;
        self.entries = match self.store.load(key) {
            Ok(Some(txt)) => match history_from_json(&txt) {
                Ok(mut entries) => {
                    entries.truncate(self.config.max_entries);
                    entries
                }
                Err(e) => {
                    log::warn!("Discarding unreadable history record {key:?}: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Failed to load history record {key:?}: {e}");
                Vec::new()
            }
        };
        log::debug!("Loaded {} history entries", self.entries.len());
    }

    /// Prepend an entry for a successful calculation and persist the sequence.
    pub fn record(
        &mut self,
        ranges: &AxisRanges,
        input_axis: Axis,
        input_value: &str,
        outputs: &ScalingResponse,
        z_in_hex: bool,
    ) {
        let entry = HistoryEntry::new(ranges, input_axis, input_value, outputs, z_in_hex);
        self.push(entry);
    }

    /// Prepend a prepared entry, evicting the oldest beyond the cap, then persist.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(self.config.max_entries);
        self.persist();
    }

    /// Empty the log and delete the durable record.
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.store.remove(&self.config.storage_key) {
            log::warn!("Failed to remove history record: {e}");
        }
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&mut self) {
        let res = history_to_json(&self.entries)
            .and_then(|txt| self.store.save(&self.config.storage_key, &txt));
        if let Err(e) = res {
            log::warn!("Failed to persist history: {e}");
        }
    }
}
