use std::fmt;

use serde::Serialize;

use crate::shared::detection::{Detection, Timestamp};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Medium => f.write_str("medium"),
            Severity::High => f.write_str("high"),
        }
    }
}

/// Which rule was broken, with the rule-specific facts.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViolationKind {
    MissingEquipment { missing: Vec<String> },
    DwellTimeExceeded { elapsed_secs: f64, max_secs: u64 },
    RestrictedAccess,
}

impl ViolationKind {
    pub fn severity(&self) -> Severity {
        match self {
            ViolationKind::MissingEquipment { .. } => Severity::High,
            ViolationKind::DwellTimeExceeded { .. } => Severity::Medium,
            ViolationKind::RestrictedAccess => Severity::High,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViolationKind::MissingEquipment { .. } => "missing_equipment",
            ViolationKind::DwellTimeExceeded { .. } => "dwell_time_exceeded",
            ViolationKind::RestrictedAccess => "restricted_access",
        }
    }
}

/// One rule breach by one person in one zone in one frame.
///
/// Carries everything a renderer needs to draw an overlay.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ZoneViolation {
    pub zone_id: String,
    pub zone_name: String,
    pub kind: ViolationKind,
    pub detection: Detection,
    pub message: String,
    pub timestamp: Timestamp,
    pub severity: Severity,
}

impl ZoneViolation {
    pub fn new(
        zone_id: impl Into<String>,
        zone_name: impl Into<String>,
        kind: ViolationKind,
        detection: Detection,
        timestamp: Timestamp,
    ) -> Self {
        let zone_name = zone_name.into();
        let message = describe(&kind, &zone_name);
        let severity = kind.severity();
        Self {
            zone_id: zone_id.into(),
            zone_name,
            kind,
            detection,
            message,
            timestamp,
            severity,
        }
    }
}

fn describe(kind: &ViolationKind, zone_name: &str) -> String {
    match kind {
        ViolationKind::MissingEquipment { missing } => {
            format!("Missing equipment in {zone_name}: {}", missing.join(", "))
        }
        ViolationKind::DwellTimeExceeded {
            elapsed_secs,
            max_secs,
        } => format!(
            "Dwell time exceeded in {zone_name}: {}s / {max_secs}s",
            elapsed_secs.trunc() as u64
        ),
        ViolationKind::RestrictedAccess => format!("Unauthorized access in {zone_name}"),
    }
}
