use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::ingest::domain::detection_source::{DetectionFrame, DetectionSource};
use crate::pipeline::frame_evaluator::FrameEvaluator;
use crate::pipeline::pipeline_executor::{PipelineConfig, PipelineExecutor, RunSummary};
use crate::reporting::domain::violation_sink::{FrameReport, ViolationSink};

const DEFAULT_CHANNEL_CAPACITY: usize = 8;

type SendError = Box<dyn std::error::Error + Send + Sync>;

/// Runs ingestion and reporting on dedicated threads.
///
/// Layout: `reader → main [classify/evaluate/sweep] → sink`
///
/// Rule evaluation stays on the calling thread, so dwell state is only ever
/// touched from one place and frames are evaluated strictly in order.
pub struct ThreadedPipelineExecutor {
    channel_capacity: usize,
}

impl ThreadedPipelineExecutor {
    pub fn new() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    pub fn with_channel_capacity(capacity: usize) -> Self {
        Self {
            channel_capacity: capacity.max(1),
        }
    }
}

impl Default for ThreadedPipelineExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineExecutor for ThreadedPipelineExecutor {
    fn execute(
        &self,
        source: Box<dyn DetectionSource>,
        sink: Box<dyn ViolationSink>,
        mut evaluator: FrameEvaluator,
        mut config: PipelineConfig,
    ) -> Result<RunSummary, Box<dyn std::error::Error>> {
        let cap = self.channel_capacity;
        let total = source.total_frames();

        let (frame_tx, frame_rx) =
            crossbeam_channel::bounded::<Result<DetectionFrame, SendError>>(cap);
        let (report_tx, report_rx) = crossbeam_channel::bounded::<FrameReport>(cap);

        let reader_handle = spawn_reader(source, frame_tx, config.cancelled.clone());
        let sink_handle = spawn_sink(sink, report_rx);

        let main_error = run_main_loop(frame_rx, &report_tx, &mut evaluator, &mut config, total);

        drop(report_tx);

        join_threads(reader_handle, sink_handle, main_error)?;
        config.logger.summary();
        Ok(evaluator.into_summary())
    }
}

fn spawn_reader(
    mut source: Box<dyn DetectionSource>,
    frame_tx: crossbeam_channel::Sender<Result<DetectionFrame, SendError>>,
    cancelled: Arc<AtomicBool>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        for frame_result in source.frames() {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            let mapped = frame_result.map_err(|e| -> SendError { e.to_string().into() });
            let failed = mapped.is_err();
            if frame_tx.send(mapped).is_err() || failed {
                break;
            }
        }
    })
}

fn spawn_sink(
    mut sink: Box<dyn ViolationSink>,
    report_rx: crossbeam_channel::Receiver<FrameReport>,
) -> JoinHandle<Result<(), SendError>> {
    std::thread::spawn(move || {
        for report in report_rx {
            sink.report(&report)
                .map_err(|e| -> SendError { e.to_string().into() })?;
        }
        sink.finish()
            .map_err(|e| -> SendError { e.to_string().into() })
    })
}

/// Receives frames, evaluates them in order and forwards reports.
fn run_main_loop(
    frame_rx: crossbeam_channel::Receiver<Result<DetectionFrame, SendError>>,
    report_tx: &crossbeam_channel::Sender<FrameReport>,
    evaluator: &mut FrameEvaluator,
    config: &mut PipelineConfig,
    total: Option<usize>,
) -> Option<Box<dyn std::error::Error>> {
    for frame_result in frame_rx {
        if config.cancelled.load(Ordering::Relaxed) {
            break;
        }

        let frame = match frame_result {
            Ok(frame) => frame,
            Err(e) => return Some(e.to_string().into()),
        };

        let report = evaluator.process(frame, config.logger.as_mut());
        if report_tx.send(report).is_err() {
            return Some("Sink channel closed unexpectedly".into());
        }

        let processed = evaluator.frames_processed();
        config.logger.progress(processed, total);
        if let Some(ref callback) = config.on_progress {
            if !callback(processed, total) {
                config.cancelled.store(true, Ordering::Relaxed);
                return Some("Cancelled".into());
            }
        }
    }
    None
}

/// Joins both worker threads and coalesces the first error encountered.
fn join_threads(
    reader_handle: JoinHandle<()>,
    sink_handle: JoinHandle<Result<(), SendError>>,
    mut first_error: Option<Box<dyn std::error::Error>>,
) -> Result<(), Box<dyn std::error::Error>> {
    fn set_if_none(slot: &mut Option<Box<dyn std::error::Error>>, err: Box<dyn std::error::Error>) {
        if slot.is_none() {
            *slot = Some(err);
        }
    }

    if reader_handle.join().is_err() {
        set_if_none(&mut first_error, "Reader thread panicked".into());
    }

    match sink_handle.join() {
        Ok(Ok(())) => {}
        Ok(Err(e)) => set_if_none(&mut first_error, e.to_string().into()),
        Err(_) => set_if_none(&mut first_error, "Sink thread panicked".into()),
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
