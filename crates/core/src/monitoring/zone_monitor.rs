use std::sync::Arc;

use crate::equipment::domain::equipment_matcher::EquipmentMatcher;
use crate::monitoring::domain::dwell_tracker::{DwellTracker, DwellTracking};
use crate::monitoring::domain::violation::{ViolationKind, ZoneViolation};
use crate::shared::detection::{Detection, Timestamp};
use crate::zones::domain::zone::Zone;
use crate::zones::domain::zone_config::ZoneConfig;
use crate::zones::domain::zone_locator::ZoneLocator;

/// What happens to a track's dwell entry when it is seen outside the zone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExitPolicy {
    /// Keep the first-seen time until the periodic sweep evicts it.
    #[default]
    Retain,
    /// Forget the entry as soon as the track is observed with its center
    /// outside that zone. Tracks absent from a frame keep their entries.
    ResetOnExit,
}

/// Applies each zone's rules to the persons standing in it.
///
/// Stateful only through the dwell tracker: identical inputs and identical
/// dwell state produce identical output.
pub struct ZoneMonitor {
    locator: ZoneLocator,
    matcher: EquipmentMatcher,
    dwell: Box<dyn DwellTracking>,
    exit_policy: ExitPolicy,
}

impl ZoneMonitor {
    pub fn new(config: Arc<ZoneConfig>) -> Self {
        Self {
            locator: ZoneLocator::new(config),
            matcher: EquipmentMatcher::default(),
            dwell: Box::new(DwellTracker::new()),
            exit_policy: ExitPolicy::default(),
        }
    }

    pub fn with_dwell_tracker(mut self, dwell: Box<dyn DwellTracking>) -> Self {
        self.dwell = dwell;
        self
    }

    pub fn with_equipment_matcher(mut self, matcher: EquipmentMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn with_exit_policy(mut self, exit_policy: ExitPolicy) -> Self {
        self.exit_policy = exit_policy;
        self
    }

    pub fn zones(&self) -> &[Zone] {
        self.locator.zones()
    }

    pub fn tracked_entries(&self) -> usize {
        self.dwell.len()
    }

    /// Evaluates one frame.
    ///
    /// Violations are ordered by person (input order), then by rule:
    /// missing equipment, dwell time, restricted access.
    pub fn evaluate(
        &mut self,
        persons: &[Detection],
        equipment: &[Detection],
        now: Timestamp,
    ) -> Vec<ZoneViolation> {
        let mut violations = Vec::new();

        for person in persons {
            let zone = self.locator.locate(person.center());

            if self.exit_policy == ExitPolicy::ResetOnExit {
                if let Some(track_id) = person.track_id() {
                    let current = zone.map(Zone::id);
                    for left in self.dwell.zones_for(track_id) {
                        if Some(left.as_str()) != current {
                            log::debug!("Track {track_id} left zone '{left}'");
                            self.dwell.remove(track_id, &left);
                        }
                    }
                }
            }

            let Some(zone) = zone else {
                continue;
            };
            let rules = zone.rules();
            let mut emit = |kind: ViolationKind| {
                violations.push(ZoneViolation::new(
                    zone.id(),
                    zone.name(),
                    kind,
                    person.clone(),
                    now,
                ));
            };

            if rules.requires_equipment() {
                let missing =
                    self.matcher
                        .missing_equipment(person, equipment, &rules.required_equipment);
                if !missing.is_empty() {
                    emit(ViolationKind::MissingEquipment { missing });
                }
            }

            if let (Some(max_secs), Some(track_id)) = (rules.max_dwell_secs, person.track_id()) {
                let elapsed_secs = self.dwell.update(track_id, zone.id(), now);
                if elapsed_secs > max_secs as f64 {
                    emit(ViolationKind::DwellTimeExceeded {
                        elapsed_secs,
                        max_secs,
                    });
                }
            }

            if rules.restricted_access {
                emit(ViolationKind::RestrictedAccess);
            }
        }

        violations
    }

    /// Evicts dwell entries older than `max_age_secs`.
    ///
    /// Bounds memory only; it is not an exit signal.
    pub fn sweep(&mut self, max_age_secs: f64, now: Timestamp) -> usize {
        let evicted = self.dwell.sweep(max_age_secs, now);
        if evicted > 0 {
            log::debug!("Swept {evicted} stale dwell entries");
        }
        evicted
    }
}
