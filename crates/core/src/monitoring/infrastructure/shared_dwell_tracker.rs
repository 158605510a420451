use std::sync::{Arc, Mutex, MutexGuard};

use crate::monitoring::domain::dwell_tracker::{DwellTracker, DwellTracking};
use crate::shared::detection::Timestamp;

/// Dwell state shared across threads behind a single lock.
///
/// Clones share the same state. Every operation holds the lock for its
/// whole read-modify sequence.
#[derive(Clone, Debug, Default)]
pub struct SharedDwellTracker {
    inner: Arc<Mutex<DwellTracker>>,
}

impl SharedDwellTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, DwellTracker> {
        // The map stays consistent even if a holder panicked mid-call.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DwellTracking for SharedDwellTracker {
    fn update(&mut self, track_id: u32, zone_id: &str, now: Timestamp) -> f64 {
        self.lock().update(track_id, zone_id, now)
    }

    fn remove(&mut self, track_id: u32, zone_id: &str) {
        self.lock().remove(track_id, zone_id);
    }

    fn sweep(&mut self, max_age_secs: f64, now: Timestamp) -> usize {
        self.lock().sweep(max_age_secs, now)
    }

    fn zones_for(&self, track_id: u32) -> Vec<String> {
        self.lock().zones_for(track_id)
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}
