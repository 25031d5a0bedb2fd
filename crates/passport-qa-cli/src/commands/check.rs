//! Check command - validate photos against passport requirements.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use passport_qa_adapters::{FsImageSource, NoLandmarks, SidecarLandmarks};
use passport_qa_core::{
    ImageSource, LandmarkDetector, ProgressEvent, ProgressSink, ReportOutput, UnreadableImage,
    ValidationConfig, ValidationEngine, ValidationError,
};
use tracing::{debug, info, warn};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressBar, TextOutput};

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
    /// Human-readable report per photo
    Text,
}

impl OutputFormat {
    fn from_config(value: &str) -> Option<Self> {
        match value {
            "jsonl" => Some(Self::Jsonl),
            "json" => Some(Self::Json),
            "text" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Parse and validate a fraction value (0.0-1.0).
fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=1.0"))
    }
}

/// Parse and validate a photo size in pixels.
fn parse_size(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid pixel size"))?;
    if value == 0 {
        Err("size must be at least 1 pixel".to_string())
    } else {
        Ok(value)
    }
}

/// Shared arguments for photo validation.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct CheckArgs {
    /// Files or directories to validate
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Required side length of the square photo in pixels
    #[arg(long, value_parser = parse_size)]
    pub size: Option<u32>,

    /// Lowest accepted head ratio (0.0-1.0)
    #[arg(long, value_parser = parse_threshold)]
    pub head_ratio_min: Option<f64>,

    /// Highest accepted head ratio (0.0-1.0)
    #[arg(long, value_parser = parse_threshold)]
    pub head_ratio_max: Option<f64>,

    /// Maximum nose offset from centre as a fraction of width (0.0-1.0)
    #[arg(long, value_parser = parse_threshold)]
    pub centering_tolerance: Option<f64>,

    /// Minimum fraction of near-white border pixels (0.0-1.0)
    #[arg(long, value_parser = parse_threshold)]
    pub whiteness_threshold: Option<f64>,

    /// Ignore landmark sidecar files (geometry rules are skipped)
    #[arg(long)]
    pub no_landmarks: bool,

    /// Include raw metrics in output
    #[arg(long)]
    pub metrics: bool,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Merged config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    config: Option<AppConfig>,
}

impl CheckArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Built-in defaults
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        // Recursive: config applies only if CLI --recursive not passed
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        // Output format: CLI > config
        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_deref()
                .and_then(OutputFormat::from_config);
        }

        // Boolean output options: CLI flag wins, then config
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.metrics {
            args.metrics = config.output.metrics.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        // Thresholds are resolved in `validation_config`
        args.config = Some(config.clone());

        args
    }

    /// Thresholds after layering CLI flags over config file values.
    pub fn validation_config(&self) -> ValidationConfig {
        let mut config = self
            .config
            .as_ref()
            .map_or_else(ValidationConfig::default, AppConfig::validation_config);

        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(v) = self.head_ratio_min {
            config.head_ratio_min = v;
        }
        if let Some(v) = self.head_ratio_max {
            config.head_ratio_max = v;
        }
        if let Some(v) = self.centering_tolerance {
            config.centering_tolerance = v;
        }
        if let Some(v) = self.whiteness_threshold {
            config.whiteness_threshold = v;
        }

        config
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

/// Result of running the check command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct CheckResult {
    /// Number of photos validated.
    pub processed: usize,
    /// Number of photos skipped.
    pub skipped: usize,
    /// Number of photos failing at least one rule.
    pub non_compliant: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the check command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &CheckArgs) -> Result<CheckResult> {
    info!("Running check command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let engine =
        ValidationEngine::new(args.validation_config()).context("Invalid validation settings")?;
    debug!("Validation settings: {:?}", engine.config());

    let detector: Box<dyn LandmarkDetector> = if args.no_landmarks {
        Box::new(NoLandmarks)
    } else {
        Box::new(SidecarLandmarks)
    };

    // Initialize image source
    let source = FsImageSource::new(args.paths.clone(), args.recursive);
    let total = source.count_hint();

    // Determine if we should show progress
    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);

    // Initialize output adapter
    let output: Box<dyn ReportOutput> = match args.format() {
        OutputFormat::Jsonl => Box::new(JsonOutput::stdout()),
        OutputFormat::Json => Box::new(JsonOutput::array(Box::new(std::io::stdout()), args.pretty)),
        OutputFormat::Text => Box::new(TextOutput::stdout()),
    };

    process_images(
        &source,
        &engine,
        detector.as_ref(),
        output.as_ref(),
        &progress_bar,
        args.metrics,
    )
}

/// Validate every photo from `source` and emit one report per photo.
fn process_images(
    source: &dyn ImageSource,
    engine: &ValidationEngine,
    detector: &dyn LandmarkDetector,
    output: &dyn ReportOutput,
    progress: &dyn ProgressSink,
    include_metrics: bool,
) -> Result<CheckResult> {
    let total = source.count_hint();
    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut non_compliant = 0usize;

    for (index, image_result) in source.images().enumerate() {
        let image = match image_result {
            Ok(img) => img,
            Err(e) => {
                let (path, reason) = match e.downcast_ref::<UnreadableImage>() {
                    Some(unreadable) => (unreadable.path.clone(), unreadable.reason.clone()),
                    None => (format!("image {index}"), format!("{e:#}")),
                };
                debug!("Cannot load {path}: {reason}");
                progress.on_event(ProgressEvent::Skipped { path, reason });
                skipped += 1;
                continue;
            }
        };

        progress.on_event(ProgressEvent::Started {
            path: image.path.clone(),
            index,
            total,
        });

        let validation = match engine.check_photo(&image, detector) {
            Ok(v) => v,
            Err(e @ ValidationError::InvalidImage { .. }) => {
                warn!("Cannot validate {}: {e}", image.path);
                progress.on_event(ProgressEvent::Skipped {
                    path: image.path.clone(),
                    reason: e.to_string(),
                });
                skipped += 1;
                continue;
            }
            Err(e) => return Err(e).context("Validation failed"),
        };

        let report = validation.into_photo_report(&image, include_metrics);
        if !report.report.overall_pass() {
            non_compliant += 1;
        }

        output.write(&report)?;
        progress.on_event(ProgressEvent::Completed {
            report: Box::new(report),
        });

        processed += 1;
    }

    output.flush()?;

    progress.on_event(ProgressEvent::Finished {
        processed,
        non_compliant,
        skipped,
    });

    // Determine exit code
    let exit_code = if non_compliant > 0 {
        ExitCode::NonCompliant
    } else {
        ExitCode::Success
    };

    Ok(CheckResult {
        processed,
        skipped,
        non_compliant,
        exit_code,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use clap::Parser;
    use passport_qa_core::RuleStatus;
    use passport_qa_test_support::{
        MockImageSource, MockLandmarkDetector, MockProgressSink, MockReportOutput,
        PassportPhotoBuilder, SyntheticImageBuilder,
    };

    use super::*;
    use crate::commands::Cli;

    fn engine() -> ValidationEngine {
        ValidationEngine::new(ValidationConfig::default()).unwrap()
    }

    fn parse(argv: &[&str]) -> CheckArgs {
        let cli = Cli::try_parse_from(std::iter::once("passport-qa").chain(argv.iter().copied()))
            .expect("arguments parse");
        cli.check
    }

    #[test]
    fn test_parse_threshold() {
        assert_eq!(parse_threshold("0.5"), Ok(0.5));
        assert_eq!(parse_threshold("2.0").unwrap_err(), "2 is not in 0.0..=1.0");
        assert!(parse_threshold("abc").unwrap_err().contains("not a valid number"));
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("600"), Ok(600));
        assert!(parse_size("0").is_err());
        assert!(parse_size("-1").is_err());
    }

    #[test]
    fn test_cli_flags_override_config_file() {
        let config: AppConfig = toml::from_str(
            r"
[photo]
size = 800

[background]
whiteness_threshold = 0.6
border_fraction = 0.1

[output]
format = 'text'
metrics = true
",
        )
        .unwrap();

        let args = CheckArgs::with_config(
            parse(&["--size", "500", "--format", "json", "a.png"]),
            &config,
        );
        let thresholds = args.validation_config();

        assert_eq!(thresholds.size, 500);
        assert!((thresholds.whiteness_threshold - 0.6).abs() < f64::EPSILON);
        assert!((thresholds.border_fraction - 0.1).abs() < f64::EPSILON);
        assert_eq!(args.format(), OutputFormat::Json);
        assert!(args.metrics);
    }

    #[test]
    fn test_defaults_without_config() {
        let args = parse(&["a.png"]);
        assert_eq!(args.validation_config(), ValidationConfig::default());
        assert_eq!(args.format(), OutputFormat::Jsonl);
    }

    #[test]
    fn test_process_images_counts_outcomes() {
        let good = PassportPhotoBuilder::new().path("good.png").build();
        let small = PassportPhotoBuilder::new()
            .size(500, 500)
            .path("small.png")
            .build();
        let source = MockImageSource::new(vec![good.info, small.info]).with_error("broken.jpg", "truncated file");
        let detector = MockLandmarkDetector::found(good.landmarks);
        let output = MockReportOutput::new();
        let progress = MockProgressSink::new();

        let result =
            process_images(&source, &engine(), &detector, &output, &progress, false).unwrap();

        assert_eq!(result.processed, 2);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.non_compliant, 1);
        assert_eq!(result.exit_code, ExitCode::NonCompliant);

        let reports = output.reports();
        assert_eq!(reports.len(), 2);
        assert!(reports[0].report.overall_pass());
        assert_eq!(
            reports[1].report.result("size").unwrap().passed,
            RuleStatus::Fail
        );
        assert!(reports[0].metrics.is_none());
        assert_eq!(output.flush_count(), 1);

        assert_eq!(progress.started_count(), 2);
        assert_eq!(progress.completed_count(), 2);
        assert_eq!(progress.skipped_count(), 1);
        assert_eq!(progress.finished_counts(), Some((2, 1, 1)));
    }

    #[test]
    fn test_load_failure_reports_path_once() {
        let source =
            MockImageSource::empty().with_error("/photos/broken.jpg", "truncated file");
        let progress = MockProgressSink::new();

        process_images(
            &source,
            &engine(),
            &MockLandmarkDetector::no_face(),
            &MockReportOutput::new(),
            &progress,
            false,
        )
        .unwrap();

        let skipped = progress.events().into_iter().find_map(|e| match e {
            ProgressEvent::Skipped { path, reason } => Some((path, reason)),
            _ => None,
        });
        assert_eq!(
            skipped,
            Some(("/photos/broken.jpg".to_string(), "truncated file".to_string()))
        );
    }

    #[test]
    fn test_empty_batch_is_compliant() {
        let source = MockImageSource::empty();
        let output = MockReportOutput::new();
        let progress = MockProgressSink::new();

        let detector = MockLandmarkDetector::no_face();
        let result =
            process_images(&source, &engine(), &detector, &output, &progress, false).unwrap();

        assert_eq!(result.exit_code, ExitCode::Success);
        assert!(output.reports().is_empty());
        assert_eq!(output.flush_count(), 1);
        assert_eq!(source.iteration_count(), 1);
        assert_eq!(progress.finished_counts(), Some((0, 0, 0)));
    }

    #[test]
    fn test_process_images_without_face_still_reports() {
        let photo = PassportPhotoBuilder::compliant();
        let source = MockImageSource::new(vec![photo.info]);
        let detector = MockLandmarkDetector::no_face();
        let output = MockReportOutput::new();

        let result = process_images(
            &source,
            &engine(),
            &detector,
            &output,
            &MockProgressSink::new(),
            true,
        )
        .unwrap();

        assert_eq!(result.exit_code, ExitCode::Success);
        let report = &output.reports()[0];
        assert_eq!(
            report.report.result("head_ratio").unwrap().passed,
            RuleStatus::Skipped
        );
        assert!(report.metrics.is_some());
        assert_eq!(detector.calls(), 1);
    }

    #[test]
    fn test_empty_image_is_skipped() {
        let source = MockImageSource::new(vec![SyntheticImageBuilder::uniform(0, 0, [0; 3])]);
        let progress = MockProgressSink::new();

        let result = process_images(
            &source,
            &engine(),
            &MockLandmarkDetector::no_face(),
            &MockReportOutput::new(),
            &progress,
            false,
        )
        .unwrap();

        assert_eq!(result.processed, 0);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.exit_code, ExitCode::Success);
        assert_eq!(progress.finished_counts(), Some((0, 0, 1)));
    }
}
