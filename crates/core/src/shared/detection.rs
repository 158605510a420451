use serde::{Deserialize, Serialize};

use crate::shared::bounding_box::{BoundingBox, Point};

/// Seconds on the caller's clock (typically the frame timestamp).
pub type Timestamp = f64;

/// One object observed in one frame.
///
/// Produced by an upstream detector and optionally tagged by an upstream
/// tracker. Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    bbox: BoundingBox,
    class_name: String,
    confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    track_id: Option<u32>,
}

impl Detection {
    pub fn new(bbox: BoundingBox, class_name: impl Into<String>, confidence: f64) -> Self {
        Self {
            bbox,
            class_name: class_name.into(),
            confidence,
            track_id: None,
        }
    }

    pub fn with_track_id(mut self, track_id: u32) -> Self {
        self.track_id = Some(track_id);
        self
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn track_id(&self) -> Option<u32> {
        self.track_id
    }

    pub fn center(&self) -> Point {
        self.bbox.center()
    }
}
