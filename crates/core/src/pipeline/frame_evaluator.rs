use std::time::Instant;

use crate::ingest::domain::detection_classifier::DetectionClassifier;
use crate::ingest::domain::detection_source::DetectionFrame;
use crate::monitoring::zone_monitor::ZoneMonitor;
use crate::pipeline::pipeline_executor::RunSummary;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::reporting::domain::violation_sink::FrameReport;
use crate::shared::constants::{DEFAULT_SWEEP_INTERVAL_FRAMES, DEFAULT_SWEEP_MAX_AGE_SECS};

/// How often, and how aggressively, stale dwell entries are evicted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepSettings {
    pub max_age_secs: f64,
    pub interval_frames: usize,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            max_age_secs: DEFAULT_SWEEP_MAX_AGE_SECS,
            interval_frames: DEFAULT_SWEEP_INTERVAL_FRAMES,
        }
    }
}

/// Minimum sweep age as a multiple of the longest dwell limit.
pub const DWELL_SWEEP_FACTOR: f64 = 2.0;

fn effective_max_age(monitor: &ZoneMonitor, requested: f64) -> f64 {
    let longest = monitor
        .zones()
        .iter()
        .filter_map(|z| z.rules().max_dwell_secs)
        .max();
    match longest {
        Some(limit) => {
            let floor = limit as f64 * DWELL_SWEEP_FACTOR;
            if requested < floor {
                log::info!(
                    "Raising dwell sweep age from {requested}s to {floor}s \
                     to cover a {limit}s dwell limit"
                );
                floor
            } else {
                requested
            }
        }
        None => requested,
    }
}

/// The per-frame step every executor runs: classify → evaluate → sweep.
pub struct FrameEvaluator {
    monitor: ZoneMonitor,
    classifier: DetectionClassifier,
    sweep: SweepSettings,
    summary: RunSummary,
}

impl FrameEvaluator {
    /// The sweep age is raised to at least [`DWELL_SWEEP_FACTOR`] times the
    /// longest configured dwell limit, so eviction cannot reset a clock
    /// before its zone's limit is reached.
    pub fn new(monitor: ZoneMonitor, classifier: DetectionClassifier, sweep: SweepSettings) -> Self {
        let max_age_secs = effective_max_age(&monitor, sweep.max_age_secs);
        Self {
            monitor,
            classifier,
            sweep: SweepSettings {
                max_age_secs,
                interval_frames: sweep.interval_frames.max(1),
            },
            summary: RunSummary::default(),
        }
    }

    pub fn sweep_settings(&self) -> SweepSettings {
        self.sweep
    }

    pub fn process(&mut self, frame: DetectionFrame, logger: &mut dyn PipelineLogger) -> FrameReport {
        let classified = self.classifier.classify(frame.detections);

        let started = Instant::now();
        let violations =
            self.monitor
                .evaluate(&classified.persons, &classified.equipment, frame.timestamp);
        logger.timing("evaluate", started.elapsed().as_secs_f64() * 1000.0);

        self.summary.frames += 1;
        self.summary.persons += classified.persons.len();
        self.summary.equipment += classified.equipment.len();
        for v in &violations {
            *self.summary.violations_by_kind.entry(v.kind.label()).or_default() += 1;
        }

        if self.summary.frames % self.sweep.interval_frames == 0 {
            let evicted = self.monitor.sweep(self.sweep.max_age_secs, frame.timestamp);
            self.summary.evicted_entries += evicted;
        }

        logger.metric("persons", classified.persons.len() as f64);
        logger.metric("violations", violations.len() as f64);

        FrameReport {
            frame_index: frame.index,
            timestamp: frame.timestamp,
            persons: classified.persons.len(),
            equipment: classified.equipment.len(),
            violations,
        }
    }

    pub fn frames_processed(&self) -> usize {
        self.summary.frames
    }

    pub fn monitor(&self) -> &ZoneMonitor {
        &self.monitor
    }

    pub fn into_summary(self) -> RunSummary {
        self.summary
    }
}
