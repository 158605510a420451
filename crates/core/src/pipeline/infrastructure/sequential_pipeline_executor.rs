use std::sync::atomic::Ordering;

use crate::ingest::domain::detection_source::DetectionSource;
use crate::pipeline::frame_evaluator::FrameEvaluator;
use crate::pipeline::pipeline_executor::{PipelineConfig, PipelineExecutor, RunSummary};
use crate::reporting::domain::violation_sink::ViolationSink;

/// Runs read → evaluate → report on the calling thread, one frame at a time.
#[derive(Default)]
pub struct SequentialPipelineExecutor;

impl SequentialPipelineExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineExecutor for SequentialPipelineExecutor {
    fn execute(
        &self,
        mut source: Box<dyn DetectionSource>,
        mut sink: Box<dyn ViolationSink>,
        mut evaluator: FrameEvaluator,
        mut config: PipelineConfig,
    ) -> Result<RunSummary, Box<dyn std::error::Error>> {
        let total = source.total_frames();

        for frame_result in source.frames() {
            if config.cancelled.load(Ordering::Relaxed) {
                break;
            }
            let report = evaluator.process(frame_result?, config.logger.as_mut());
            sink.report(&report)?;

            let processed = evaluator.frames_processed();
            config.logger.progress(processed, total);
            if let Some(ref callback) = config.on_progress {
                if !callback(processed, total) {
                    return Err("Cancelled".into());
                }
            }
        }

        sink.finish()?;
        config.logger.summary();
        Ok(evaluator.into_summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::domain::detection_classifier::DetectionClassifier;
    use crate::ingest::domain::detection_source::DetectionFrame;
    use crate::monitoring::zone_monitor::ZoneMonitor;
    use crate::pipeline::frame_evaluator::SweepSettings;
    use crate::pipeline::pipeline_executor::ProgressFn;
    use crate::pipeline::pipeline_logger::NullPipelineLogger;
    use crate::reporting::domain::violation_sink::FrameReport;
    use crate::shared::bounding_box::{BoundingBox, Point};
    use crate::shared::detection::Detection;
    use crate::zones::domain::polygon::Polygon;
    use crate::zones::domain::zone::{RuleSet, Zone};
    use crate::zones::domain::zone_config::{ImageSize, ZoneConfig};
    use std::sync::atomic::AtomicBool;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    struct StubSource {
        frames: Vec<DetectionFrame>,
    }

    impl DetectionSource for StubSource {
        fn frames(
            &mut self,
        ) -> Box<dyn Iterator<Item = Result<DetectionFrame, Box<dyn std::error::Error>>> + '_>
        {
            Box::new(self.frames.drain(..).map(Ok))
        }

        fn total_frames(&self) -> Option<usize> {
            Some(self.frames.len())
        }
    }

    struct FailingSource;

    impl DetectionSource for FailingSource {
        fn frames(
            &mut self,
        ) -> Box<dyn Iterator<Item = Result<DetectionFrame, Box<dyn std::error::Error>>> + '_>
        {
            let err: Box<dyn std::error::Error> = "decode failed".into();
            Box::new(std::iter::once(Err(err)))
        }
    }

    #[derive(Clone, Default)]
    struct CollectingSink {
        reports: Arc<Mutex<Vec<FrameReport>>>,
        finished: Arc<Mutex<bool>>,
    }

    impl ViolationSink for CollectingSink {
        fn report(&mut self, report: &FrameReport) -> Result<(), Box<dyn std::error::Error>> {
            self.reports.lock().unwrap().push(report.clone());
            Ok(())
        }

        fn finish(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            *self.finished.lock().unwrap() = true;
            Ok(())
        }
    }

    fn evaluator() -> FrameEvaluator {
        let polygon = Polygon::new(vec![
            Point::new(0, 0),
            Point::new(100, 0),
            Point::new(100, 100),
            Point::new(0, 100),
        ])
        .unwrap();
        let rules = RuleSet {
            restricted_access: true,
            ..RuleSet::default()
        };
        let config =
            ZoneConfig::new("f.jpg", ImageSize::default(), vec![Zone::new("r", "R", polygon, rules)])
                .unwrap();
        FrameEvaluator::new(
            ZoneMonitor::new(Arc::new(config)),
            DetectionClassifier::default(),
            SweepSettings::default(),
        )
    }

    fn frames(n: usize) -> Vec<DetectionFrame> {
        (0..n)
            .map(|i| DetectionFrame {
                index: i,
                timestamp: i as f64 * 0.5,
                detections: vec![Detection::new(BoundingBox::new(40, 40, 60, 60), "person", 0.9)],
            })
            .collect()
    }

    fn config() -> PipelineConfig {
        PipelineConfig {
            on_progress: None,
            cancelled: Arc::new(AtomicBool::new(false)),
            logger: Box::new(NullPipelineLogger),
        }
    }

    #[test]
    fn test_every_frame_reaches_sink_in_order() {
        let sink = CollectingSink::default();
        let summary = SequentialPipelineExecutor::new()
            .execute(
                Box::new(StubSource { frames: frames(4) }),
                Box::new(sink.clone()),
                evaluator(),
                config(),
            )
            .unwrap();

        let reports = sink.reports.lock().unwrap();
        let indices: Vec<usize> = reports.iter().map(|r| r.frame_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert!(reports.iter().all(|r| r.violations.len() == 1));
        assert!(*sink.finished.lock().unwrap());
        assert_eq!(summary.frames, 4);
        assert_eq!(summary.violations_of("restricted_access"), 4);
    }

    #[test]
    fn test_source_error_propagates() {
        let result = SequentialPipelineExecutor::new().execute(
            Box::new(FailingSource),
            Box::new(CollectingSink::default()),
            evaluator(),
            config(),
        );
        assert!(result.unwrap_err().to_string().contains("decode failed"));
    }

    #[test]
    fn test_progress_callback_can_cancel() {
        let mut cfg = config();
        let progress: ProgressFn = Box::new(|current, _| current < 2);
        cfg.on_progress = Some(progress);
        let sink = CollectingSink::default();

        let result = SequentialPipelineExecutor::new().execute(
            Box::new(StubSource { frames: frames(5) }),
            Box::new(sink.clone()),
            evaluator(),
            cfg,
        );

        assert!(result.is_err());
        assert_eq!(sink.reports.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_cancel_flag_stops_before_first_frame() {
        let cfg = config();
        cfg.cancelled.store(true, Ordering::Relaxed);
        let sink = CollectingSink::default();

        let summary = SequentialPipelineExecutor::new()
            .execute(
                Box::new(StubSource { frames: frames(3) }),
                Box::new(sink.clone()),
                evaluator(),
                cfg,
            )
            .unwrap();

        assert_eq!(summary.frames, 0);
        assert!(sink.reports.lock().unwrap().is_empty());
    }
}
