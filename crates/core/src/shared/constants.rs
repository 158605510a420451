/// Default confidence below which raw detections are discarded.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Dwell entries older than this are evicted by the periodic sweep (5 minutes).
pub const DEFAULT_SWEEP_MAX_AGE_SECS: f64 = 300.0;

/// Sweep the dwell state every N processed frames.
pub const DEFAULT_SWEEP_INTERVAL_FRAMES: usize = 1;

/// Detector labels treated as persons (case-sensitive substring match).
pub const PERSON_CLASSES: &[&str] = &["person", "Person", "NO-Person"];

/// Detector labels treated as protective equipment (case-sensitive substring match).
pub const EQUIPMENT_CLASSES: &[&str] = &[
    "Hardhat",
    "Safety Vest",
    "NO-Hardhat",
    "NO-Safety Vest",
    "helmet",
    "vest",
    "gloves",
    "boots",
];

/// Equipment categories and the detector labels that satisfy them,
/// matched case-insensitively by substring. Table order decides ties.
pub const EQUIPMENT_CATEGORIES: &[(&str, &[&str])] = &[
    ("helmet", &["Hardhat", "helmet"]),
    ("vest", &["Safety Vest", "vest"]),
    ("gloves", &["gloves"]),
    ("boots", &["boots", "safety-boots"]),
];
