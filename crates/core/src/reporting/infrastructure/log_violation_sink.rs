use crate::reporting::domain::violation_sink::{FrameReport, ViolationSink};

/// Reports each violation through the `log` facade at warn level.
#[derive(Default)]
pub struct LogViolationSink {
    reported: usize,
}

impl LogViolationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reported(&self) -> usize {
        self.reported
    }
}

impl ViolationSink for LogViolationSink {
    fn report(&mut self, report: &FrameReport) -> Result<(), Box<dyn std::error::Error>> {
        for v in &report.violations {
            let track = v
                .detection
                .track_id()
                .map_or_else(|| "-".to_string(), |id| id.to_string());
            log::warn!(
                "[frame {} t={:.2}s] [{}] zone={} track={track}: {}",
                report.frame_index,
                report.timestamp,
                v.severity,
                v.zone_id,
                v.message
            );
        }
        self.reported += report.violations.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitoring::domain::violation::{ViolationKind, ZoneViolation};
    use crate::shared::bounding_box::BoundingBox;
    use crate::shared::detection::Detection;

    #[test]
    fn test_counts_reported_violations() {
        let violation = ZoneViolation::new(
            "z",
            "Zone",
            ViolationKind::RestrictedAccess,
            Detection::new(BoundingBox::new(0, 0, 1, 1), "person", 0.9).with_track_id(4),
            0.0,
        );
        let mut sink = LogViolationSink::new();
        let report = FrameReport {
            frame_index: 0,
            timestamp: 0.0,
            persons: 2,
            equipment: 0,
            violations: vec![violation.clone(), violation],
        };
        sink.report(&report).unwrap();
        sink.report(&report).unwrap();
        assert_eq!(sink.reported(), 4);
    }
}
