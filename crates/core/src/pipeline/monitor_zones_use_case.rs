use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::ingest::domain::detection_classifier::DetectionClassifier;
use crate::ingest::domain::detection_source::DetectionSource;
use crate::monitoring::zone_monitor::ZoneMonitor;
use crate::reporting::domain::violation_sink::ViolationSink;

use super::frame_evaluator::{FrameEvaluator, SweepSettings};
use super::pipeline_executor::{PipelineConfig, PipelineExecutor, ProgressFn, RunSummary};
use super::pipeline_logger::{NullPipelineLogger, PipelineLogger};

/// Orchestrates a zone monitoring run over a stream of detection frames.
///
/// Wires domain components together and delegates execution to a
/// `PipelineExecutor`. This is a single-use struct: `execute` consumes
/// the owned components, so calling it twice will fail.
pub struct MonitorZonesUseCase {
    source: Option<Box<dyn DetectionSource>>,
    sink: Option<Box<dyn ViolationSink>>,
    monitor: Option<ZoneMonitor>,
    classifier: DetectionClassifier,
    sweep: SweepSettings,
    executor: Box<dyn PipelineExecutor>,
    logger: Option<Box<dyn PipelineLogger>>,
    on_progress: Option<ProgressFn>,
    cancelled: Arc<AtomicBool>,
}

impl MonitorZonesUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: Box<dyn DetectionSource>,
        sink: Box<dyn ViolationSink>,
        monitor: ZoneMonitor,
        classifier: DetectionClassifier,
        executor: Box<dyn PipelineExecutor>,
        sweep: Option<SweepSettings>,
        logger: Option<Box<dyn PipelineLogger>>,
        on_progress: Option<ProgressFn>,
        cancelled: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            source: Some(source),
            sink: Some(sink),
            monitor: Some(monitor),
            classifier,
            sweep: sweep.unwrap_or_default(),
            executor,
            logger: Some(logger.unwrap_or_else(|| Box::new(NullPipelineLogger))),
            on_progress,
            cancelled: cancelled.unwrap_or_else(|| Arc::new(AtomicBool::new(false))),
        }
    }

    pub fn execute(&mut self) -> Result<RunSummary, Box<dyn std::error::Error>> {
        let monitor = self.monitor.take().ok_or("Pipeline already executed")?;
        log::info!(
            "Monitoring {} zone(s), sweeping every {} frame(s) (max age {}s)",
            monitor.zones().len(),
            self.sweep.interval_frames,
            self.sweep.max_age_secs
        );

        let evaluator = FrameEvaluator::new(monitor, self.classifier.clone(), self.sweep);
        let config = PipelineConfig {
            on_progress: self.on_progress.take(),
            cancelled: self.cancelled.clone(),
            logger: self.logger.take().ok_or("Pipeline already executed")?,
        };

        let summary = self.executor.execute(
            self.source.take().ok_or("Pipeline already executed")?,
            self.sink.take().ok_or("Pipeline already executed")?,
            evaluator,
            config,
        )?;

        log::info!(
            "Processed {} frame(s): {} violation(s), {} stale dwell entries evicted",
            summary.frames,
            summary.total_violations(),
            summary.evicted_entries
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::domain::detection_source::DetectionFrame;
    use crate::monitoring::zone_monitor::ExitPolicy;
    use crate::pipeline::infrastructure::sequential_pipeline_executor::SequentialPipelineExecutor;
    use crate::pipeline::infrastructure::threaded_pipeline_executor::ThreadedPipelineExecutor;
    use crate::reporting::domain::violation_sink::FrameReport;
    use crate::shared::bounding_box::{BoundingBox, Point};
    use crate::shared::detection::Detection;
    use crate::zones::domain::polygon::Polygon;
    use crate::zones::domain::zone::{RuleSet, Zone};
    use crate::zones::domain::zone_config::{ImageSize, ZoneConfig};
    use rstest::rstest;
    use std::sync::atomic::Ordering;
    use std::sync::Mutex;

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

    #[derive(Clone, Default)]
    struct CollectingSink {
        reports: Arc<Mutex<Vec<FrameReport>>>,
    }

    impl ViolationSink for CollectingSink {
        fn report(&mut self, report: &FrameReport) -> Result<(), Box<dyn std::error::Error>> {
            self.reports.lock().unwrap().push(report.clone());
            Ok(())
        }
    }

    fn square(x0: i32, y0: i32, x1: i32, y1: i32) -> Polygon {
        Polygon::new(vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ])
        .unwrap()
    }

    /// A site with a helmet-only area on the left and a restricted
    /// area with a 5s dwell limit on the right.
    fn site_monitor() -> ZoneMonitor {
        let zones = vec![
            Zone::new(
                "work",
                "Work Area",
                square(0, 0, 500, 500),
                RuleSet {
                    required_equipment: vec!["helmet".into()],
                    ..RuleSet::default()
                },
            ),
            Zone::new(
                "vault",
                "Vault",
                square(600, 0, 1000, 500),
                RuleSet {
                    max_dwell_secs: Some(5),
                    restricted_access: true,
                    ..RuleSet::default()
                },
            ),
        ];
        let size = ImageSize {
            width: 1000,
            height: 500,
        };
        let config = ZoneConfig::new("site.jpg", size, zones).unwrap();
        ZoneMonitor::new(Arc::new(config))
    }

    fn person(x: i32, track_id: u32) -> Detection {
        Detection::new(BoundingBox::new(x, 100, x + 100, 300), "person", 0.9)
            .with_track_id(track_id)
    }

    fn scenario() -> Vec<DetectionFrame> {
        vec![
            DetectionFrame {
                index: 0,
                timestamp: 0.0,
                detections: vec![
                    person(100, 1),
                    Detection::new(BoundingBox::new(120, 90, 180, 130), "Hardhat", 0.8),
                ],
            },
            DetectionFrame {
                index: 1,
                timestamp: 2.0,
                detections: vec![person(100, 1), person(700, 2)],
            },
            DetectionFrame {
                index: 2,
                timestamp: 8.0,
                detections: vec![person(700, 2), person(720, 3)],
            },
        ]
    }

    #[rstest]
    #[case::sequential(Box::new(SequentialPipelineExecutor::new()) as Box<dyn PipelineExecutor>)]
    #[case::threaded(Box::new(ThreadedPipelineExecutor::new()) as Box<dyn PipelineExecutor>)]
    fn test_full_run(#[case] executor: Box<dyn PipelineExecutor>) {
        let sink = CollectingSink::default();
        let mut use_case = MonitorZonesUseCase::new(
            Box::new(StubSource { frames: scenario() }),
            Box::new(sink.clone()),
            site_monitor(),
            DetectionClassifier::default(),
            executor,
            None,
            None,
            None,
            None,
        );

        let summary = use_case.execute().unwrap();

        assert_eq!(summary.frames, 3);
        assert_eq!(summary.persons, 5);
        assert_eq!(summary.equipment, 1);
        // Frame 1: track 1 lost its helmet, track 2 entered the vault.
        // Frame 2: track 2 overstayed and is still unauthorized, track 3 entered.
        assert_eq!(summary.violations_of("missing_equipment"), 1);
        assert_eq!(summary.violations_of("restricted_access"), 3);
        assert_eq!(summary.violations_of("dwell_time_exceeded"), 1);

        let reports = sink.reports.lock().unwrap();
        assert_eq!(reports.len(), 3);
        assert!(reports[0].violations.is_empty());
        assert_eq!(reports[1].violations.len(), 2);
        assert_eq!(reports[2].violations.len(), 3);
    }

    #[test]
    fn test_execute_twice_fails() {
        let mut use_case = MonitorZonesUseCase::new(
            Box::new(StubSource { frames: vec![] }),
            Box::new(CollectingSink::default()),
            site_monitor(),
            DetectionClassifier::default(),
            Box::new(SequentialPipelineExecutor::new()),
            None,
            None,
            None,
            None,
        );
        assert!(use_case.execute().is_ok());
        let err = use_case.execute().unwrap_err();
        assert!(err.to_string().contains("already executed"));
    }

    #[test]
    fn test_confidence_threshold_applies() {
        let sink = CollectingSink::default();
        let mut use_case = MonitorZonesUseCase::new(
            Box::new(StubSource { frames: scenario() }),
            Box::new(sink.clone()),
            site_monitor(),
            DetectionClassifier::new(0.95),
            Box::new(SequentialPipelineExecutor::new()),
            None,
            None,
            None,
            None,
        );

        let summary = use_case.execute().unwrap();

        assert_eq!(summary.persons, 0);
        assert_eq!(summary.total_violations(), 0);
    }

    #[test]
    fn test_exit_policy_flows_through_monitor() {
        let frames = vec![
            DetectionFrame {
                index: 0,
                timestamp: 0.0,
                detections: vec![person(700, 2)],
            },
            DetectionFrame {
                index: 1,
                timestamp: 4.0,
                detections: vec![person(100, 2)],
            },
            DetectionFrame {
                index: 2,
                timestamp: 7.0,
                detections: vec![person(700, 2)],
            },
        ];
        let monitor = site_monitor().with_exit_policy(ExitPolicy::ResetOnExit);
        let mut use_case = MonitorZonesUseCase::new(
            Box::new(StubSource { frames }),
            Box::new(CollectingSink::default()),
            monitor,
            DetectionClassifier::default(),
            Box::new(SequentialPipelineExecutor::new()),
            None,
            None,
            None,
            None,
        );

        let summary = use_case.execute().unwrap();

        // Re-entry at t=7 restarts the clock, so no dwell violation.
        assert_eq!(summary.violations_of("dwell_time_exceeded"), 0);
    }

    #[test]
    fn test_shared_cancel_flag() {
        let cancelled = Arc::new(AtomicBool::new(false));
        cancelled.store(true, Ordering::Relaxed);
        let mut use_case = MonitorZonesUseCase::new(
            Box::new(StubSource { frames: scenario() }),
            Box::new(CollectingSink::default()),
            site_monitor(),
            DetectionClassifier::default(),
            Box::new(SequentialPipelineExecutor::new()),
            None,
            None,
            None,
            Some(cancelled),
        );

        assert_eq!(use_case.execute().unwrap().frames, 0);
    }
}
