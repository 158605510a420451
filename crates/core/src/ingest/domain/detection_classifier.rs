use crate::shared::constants::{DEFAULT_CONFIDENCE_THRESHOLD, EQUIPMENT_CLASSES, PERSON_CLASSES};
use crate::shared::detection::Detection;

/// Raw detections of one frame, split by role.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassifiedDetections {
    pub persons: Vec<Detection>,
    pub equipment: Vec<Detection>,
}

/// Splits detector output into persons and equipment.
///
/// Labels are matched by case-sensitive substring against the person list
/// first, then the equipment list. Anything else, and anything below the
/// confidence threshold, is dropped.
#[derive(Clone, Debug)]
pub struct DetectionClassifier {
    confidence_threshold: f64,
    person_classes: Vec<String>,
    equipment_classes: Vec<String>,
}

impl DetectionClassifier {
    pub fn new(confidence_threshold: f64) -> Self {
        Self {
            confidence_threshold,
            person_classes: PERSON_CLASSES.iter().map(|s| s.to_string()).collect(),
            equipment_classes: EQUIPMENT_CLASSES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_classes(
        mut self,
        person_classes: Vec<String>,
        equipment_classes: Vec<String>,
    ) -> Self {
        self.person_classes = person_classes;
        self.equipment_classes = equipment_classes;
        self
    }

    pub fn classify(&self, detections: Vec<Detection>) -> ClassifiedDetections {
        let mut out = ClassifiedDetections::default();
        for det in detections {
            if det.confidence() < self.confidence_threshold {
                continue;
            }
            if matches_any(det.class_name(), &self.person_classes) {
                out.persons.push(det);
            } else if matches_any(det.class_name(), &self.equipment_classes) {
                out.equipment.push(det);
            }
        }
        out
    }
}

impl Default for DetectionClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_THRESHOLD)
    }
}

fn matches_any(label: &str, classes: &[String]) -> bool {
    classes.iter().any(|c| label.contains(c.as_str()))
}
