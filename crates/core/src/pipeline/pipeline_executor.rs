use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::ingest::domain::detection_source::DetectionSource;
use crate::pipeline::frame_evaluator::FrameEvaluator;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::reporting::domain::violation_sink::ViolationSink;

/// Progress callback: `(frames_processed, total_frames)`. Return `false` to stop.
pub type ProgressFn = Box<dyn Fn(usize, Option<usize>) -> bool + Send>;

/// Per-run knobs shared by every executor.
pub struct PipelineConfig {
    pub on_progress: Option<ProgressFn>,
    pub cancelled: Arc<AtomicBool>,
    pub logger: Box<dyn PipelineLogger>,
}

/// Totals for one monitoring run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    pub frames: usize,
    pub persons: usize,
    pub equipment: usize,
    pub evicted_entries: usize,
    pub violations_by_kind: BTreeMap<&'static str, usize>,
}

impl RunSummary {
    pub fn total_violations(&self) -> usize {
        self.violations_by_kind.values().sum()
    }

    pub fn violations_of(&self, kind: &str) -> usize {
        self.violations_by_kind.get(kind).copied().unwrap_or(0)
    }
}

/// Abstracts how the read → evaluate → report loop is run.
///
/// Infrastructure provides concrete implementations (sequential, threaded).
pub trait PipelineExecutor: Send {
    fn execute(
        &self,
        source: Box<dyn DetectionSource>,
        sink: Box<dyn ViolationSink>,
        evaluator: FrameEvaluator,
        config: PipelineConfig,
    ) -> Result<RunSummary, Box<dyn std::error::Error>>;
}
