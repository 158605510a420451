pub mod detection_classifier;
pub mod detection_source;
