use std::collections::HashMap;

use crate::shared::detection::Timestamp;

/// Domain interface for per-(track, zone) dwell bookkeeping.
///
/// Only first-seen times are recorded; there is no notion of zone exit.
/// Callers that want exit semantics call `remove` themselves.
pub trait DwellTracking: Send {
    /// Records first presence if absent and returns seconds since first presence.
    fn update(&mut self, track_id: u32, zone_id: &str, now: Timestamp) -> f64;

    fn remove(&mut self, track_id: u32, zone_id: &str);

    /// Evicts entries older than `max_age_secs`. Returns how many were evicted.
    fn sweep(&mut self, max_age_secs: f64, now: Timestamp) -> usize;

    /// Zone ids with an active entry for this track.
    fn zones_for(&self, track_id: u32) -> Vec<String>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory dwell state keyed by track id, then zone id.
///
/// An entry's timestamp is written once on first observation and never
/// refreshed while present.
#[derive(Debug, Default)]
pub struct DwellTracker {
    entries: HashMap<u32, HashMap<String, Timestamp>>,
}

impl DwellTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry_time(&self, track_id: u32, zone_id: &str) -> Option<Timestamp> {
        self.entries.get(&track_id)?.get(zone_id).copied()
    }
}

impl DwellTracking for DwellTracker {
    fn update(&mut self, track_id: u32, zone_id: &str, now: Timestamp) -> f64 {
        let zones = self.entries.entry(track_id).or_default();
        match zones.get(zone_id) {
            Some(&since) => (now - since).max(0.0),
            None => {
                zones.insert(zone_id.to_string(), now);
                0.0
            }
        }
    }

    fn remove(&mut self, track_id: u32, zone_id: &str) {
        if let Some(zones) = self.entries.get_mut(&track_id) {
            zones.remove(zone_id);
            if zones.is_empty() {
                self.entries.remove(&track_id);
            }
        }
    }

    fn sweep(&mut self, max_age_secs: f64, now: Timestamp) -> usize {
        let mut evicted = 0;
        self.entries.retain(|_, zones| {
            let before = zones.len();
            zones.retain(|_, since| now - *since <= max_age_secs);
            evicted += before - zones.len();
            !zones.is_empty()
        });
        evicted
    }

    fn zones_for(&self, track_id: u32) -> Vec<String> {
        self.entries
            .get(&track_id)
            .map(|zones| zones.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }
}
