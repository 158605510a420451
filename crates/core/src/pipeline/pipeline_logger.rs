use std::collections::BTreeMap;
use std::time::Instant;

/// Observer for monitoring-run events: progress, stage timings and
/// per-frame counts.
pub trait PipelineLogger: Send {
    /// `total` is `None` for open-ended sources such as stdin.
    fn progress(&mut self, current: usize, total: Option<usize>);

    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// One sample of a per-frame count (persons, violations, ...).
    fn metric(&mut self, name: &str, value: f64);

    fn summary(&self) {}
}

pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _current: usize, _total: Option<usize>) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
}

/// Running aggregate of one sample stream. Constant size however long the run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SampleStats {
    pub count: usize,
    pub sum: f64,
    pub peak: f64,
}

impl SampleStats {
    fn record(&mut self, value: f64) {
        self.peak = if self.count == 0 {
            value
        } else {
            self.peak.max(value)
        };
        self.count += 1;
        self.sum += value;
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// CLI logger. Reports progress through `log` every `report_every` frames
/// and prints a run summary at the end.
pub struct StdoutPipelineLogger {
    report_every: usize,
    stages: BTreeMap<String, SampleStats>,
    counts: BTreeMap<String, SampleStats>,
    started: Instant,
    frames: usize,
}

impl StdoutPipelineLogger {
    pub fn new(report_every: usize) -> Self {
        Self {
            report_every: report_every.max(1),
            stages: BTreeMap::new(),
            counts: BTreeMap::new(),
            started: Instant::now(),
            frames: 0,
        }
    }

    pub fn stage(&self, name: &str) -> Option<SampleStats> {
        self.stages.get(name).copied()
    }

    pub fn count(&self, name: &str) -> Option<SampleStats> {
        self.counts.get(name).copied()
    }

    /// `None` until at least one frame has been timed or counted.
    pub fn report(&self) -> Option<String> {
        if self.stages.is_empty() && self.counts.is_empty() {
            return None;
        }

        let secs = self.started.elapsed().as_secs_f64();
        let mut lines = vec![format!(
            "Monitoring summary ({} frames in {secs:.1}s):",
            self.frames
        )];
        for (name, s) in &self.stages {
            lines.push(format!(
                "  {name:10} avg {:6.3}ms  peak {:6.3}ms",
                s.mean(),
                s.peak
            ));
        }
        for (name, s) in &self.counts {
            lines.push(format!(
                "  {name:10} {:.0} total, {:.0} peak per frame",
                s.sum, s.peak
            ));
        }
        if self.frames > 0 && secs > 0.0 {
            lines.push(format!("  rate       {:.1} frames/s", self.frames as f64 / secs));
        }
        Some(lines.join("\n"))
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(100)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn progress(&mut self, current: usize, total: Option<usize>) {
        self.frames = current;
        let due = current % self.report_every == 0;
        match total {
            Some(total) if total > 0 => {
                if due || current == total {
                    log::info!("Frame {current}/{total}");
                }
            }
            _ if due => log::info!("Frame {current}"),
            _ => {}
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.stages.entry(stage.to_string()).or_default().record(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.counts.entry(name.to_string()).or_default().record(value);
    }

    fn summary(&self) {
        if let Some(text) = self.report() {
            log::info!("\n{text}");
        }
    }
}
