use serde::Serialize;

use crate::monitoring::domain::violation::ZoneViolation;
use crate::shared::detection::Timestamp;

/// Outcome of evaluating one frame, handed to the renderer side.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameReport {
    pub frame_index: usize,
    pub timestamp: Timestamp,
    pub persons: usize,
    pub equipment: usize,
    pub violations: Vec<ZoneViolation>,
}

/// Consumes per-frame violation reports (overlay renderer, event log, ...).
pub trait ViolationSink: Send {
    fn report(&mut self, report: &FrameReport) -> Result<(), Box<dyn std::error::Error>>;

    /// Flushes buffered output. Default: no-op.
    fn finish(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}
