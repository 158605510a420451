use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::Parser;

use zoneguard_core::ingest::domain::detection_classifier::DetectionClassifier;
use zoneguard_core::ingest::domain::detection_source::DetectionSource;
use zoneguard_core::ingest::infrastructure::json_lines_detection_source::JsonLinesDetectionSource;
use zoneguard_core::monitoring::zone_monitor::{ExitPolicy, ZoneMonitor};
use zoneguard_core::pipeline::frame_evaluator::SweepSettings;
use zoneguard_core::pipeline::infrastructure::sequential_pipeline_executor::SequentialPipelineExecutor;
use zoneguard_core::pipeline::infrastructure::threaded_pipeline_executor::ThreadedPipelineExecutor;
use zoneguard_core::pipeline::monitor_zones_use_case::MonitorZonesUseCase;
use zoneguard_core::pipeline::pipeline_executor::PipelineExecutor;
use zoneguard_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use zoneguard_core::reporting::domain::violation_sink::ViolationSink;
use zoneguard_core::reporting::infrastructure::json_lines_violation_sink::JsonLinesViolationSink;
use zoneguard_core::reporting::infrastructure::log_violation_sink::LogViolationSink;
use zoneguard_core::shared::constants::{
    DEFAULT_SWEEP_INTERVAL_FRAMES, DEFAULT_SWEEP_MAX_AGE_SECS,
};
use zoneguard_core::zones::domain::zone_config::ZoneConfig;
use zoneguard_core::zones::infrastructure::json_zone_loader;

/// Zone-based safety monitoring over recorded detections.
#[derive(Parser)]
#[command(name = "zoneguard")]
struct Cli {
    /// Zone configuration JSON file.
    zones: PathBuf,

    /// Detection frames as JSON lines ("-" reads stdin).
    detections: Option<PathBuf>,

    /// Write frames with violations to this JSON-lines file.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Minimum detection confidence (0.0-1.0).
    #[arg(long, default_value = "0.5")]
    confidence: f64,

    /// Evict dwell entries older than this many seconds (never less than
    /// twice the longest zone dwell limit).
    #[arg(long, default_value_t = DEFAULT_SWEEP_MAX_AGE_SECS)]
    sweep_max_age: f64,

    /// Sweep stale dwell entries every Nth frame.
    #[arg(long, default_value_t = DEFAULT_SWEEP_INTERVAL_FRAMES)]
    sweep_interval: usize,

    /// Restart a person's dwell clock when they are seen leaving a zone.
    #[arg(long)]
    reset_on_exit: bool,

    /// Read and report on separate threads.
    #[arg(long)]
    threaded: bool,

    /// Print the loaded zones and their rules, then exit.
    #[arg(long)]
    list_zones: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let config = json_zone_loader::load(&cli.zones)?;

    if cli.list_zones {
        print_zones(&config);
        return Ok(());
    }

    let detections = cli
        .detections
        .as_deref()
        .ok_or("A detections file is required unless --list-zones is used")?;

    let exit_policy = if cli.reset_on_exit {
        ExitPolicy::ResetOnExit
    } else {
        ExitPolicy::Retain
    };
    let monitor = ZoneMonitor::new(Arc::new(config)).with_exit_policy(exit_policy);

    let executor: Box<dyn PipelineExecutor> = if cli.threaded {
        Box::new(ThreadedPipelineExecutor::new())
    } else {
        Box::new(SequentialPipelineExecutor::new())
    };

    let sweep = SweepSettings {
        max_age_secs: cli.sweep_max_age,
        interval_frames: cli.sweep_interval,
    };

    let mut use_case = MonitorZonesUseCase::new(
        open_source(detections)?,
        open_sink(cli.output.as_deref())?,
        monitor,
        DetectionClassifier::new(cli.confidence),
        executor,
        Some(sweep),
        Some(Box::new(StdoutPipelineLogger::default())),
        None,
        None,
    );
    let summary = use_case.execute()?;

    for (kind, count) in &summary.violations_by_kind {
        log::info!("  {kind}: {count}");
    }
    if let Some(output) = &cli.output {
        log::info!("Violations written to {}", output.display());
    }
    Ok(())
}

fn open_source(path: &Path) -> Result<Box<dyn DetectionSource>, Box<dyn std::error::Error>> {
    if path == Path::new("-") {
        Ok(Box::new(JsonLinesDetectionSource::new(std::io::stdin())))
    } else {
        Ok(Box::new(JsonLinesDetectionSource::open(path)?))
    }
}

fn open_sink(output: Option<&Path>) -> Result<Box<dyn ViolationSink>, Box<dyn std::error::Error>> {
    match output {
        Some(path) => Ok(Box::new(JsonLinesViolationSink::create(path)?)),
        None => Ok(Box::new(LogViolationSink::new())),
    }
}

fn print_zones(config: &ZoneConfig) {
    let size = config.image_size();
    println!(
        "{} ({}x{}), {} zone(s)",
        config.image_reference(),
        size.width,
        size.height,
        config.zones().len()
    );
    for zone in config.zones() {
        let rules = zone.rules();
        let equipment = if rules.required_equipment.is_empty() {
            "none".to_string()
        } else {
            rules.required_equipment.join(", ")
        };
        let dwell = rules
            .max_dwell_secs
            .map_or_else(|| "unlimited".to_string(), |s| format!("{s}s"));
        println!(
            "  [{}] {}: {} vertices, equipment: {equipment}, max dwell: {dwell}, restricted: {}",
            zone.id(),
            zone.name(),
            zone.polygon().vertices().len(),
            rules.restricted_access
        );
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.zones.exists() {
        return Err(format!("Zone file not found: {}", cli.zones.display()).into());
    }
    if let Some(detections) = &cli.detections {
        if detections != Path::new("-") && !detections.exists() {
            return Err(format!("Detections file not found: {}", detections.display()).into());
        }
    }
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    if cli.sweep_max_age.is_nan() || cli.sweep_max_age <= 0.0 {
        return Err(format!(
            "Sweep max age must be a positive number of seconds, got {}",
            cli.sweep_max_age
        )
        .into());
    }
    if cli.sweep_interval == 0 {
        return Err("Sweep interval must be at least 1 frame".into());
    }
    Ok(())
}
