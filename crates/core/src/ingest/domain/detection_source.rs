use serde::{Deserialize, Serialize};

use crate::shared::detection::{Detection, Timestamp};

/// All raw detections produced for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionFrame {
    pub index: usize,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub detections: Vec<Detection>,
}

/// Upstream detector output, one frame at a time.
///
/// Implementations hide where detections come from (a live model, a
/// recording) while the pipeline works with `DetectionFrame`.
pub trait DetectionSource: Send {
    /// Returns an iterator over frames in capture order.
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<DetectionFrame, Box<dyn std::error::Error>>> + '_>;

    /// Total frame count if known up front.
    fn total_frames(&self) -> Option<usize> {
        None
    }
}
