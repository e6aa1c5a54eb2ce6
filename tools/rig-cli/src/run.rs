//! Execute a scene script and generate a report

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use rigview_core::{ExecutionReport, HeadlessConfig, HeadlessRunner};

#[derive(Args)]
pub struct RunArgs {
    /// Scene script (TOML)
    pub script: PathBuf,

    /// Write the JSON execution report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Stop at the first failed assertion
    #[arg(long)]
    pub fail_fast: bool,

    /// Config file to use instead of the platform config
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: RunArgs) -> Result<()> {
    let config = crate::load_config(args.config.as_deref())?;
    let headless = HeadlessConfig {
        fail_fast: args.fail_fast,
        script_path: None,
    };

    let mut runner = HeadlessRunner::from_file(&args.script, &config, headless)
        .with_context(|| format!("Failed to load script: {}", args.script.display()))?;
    let report = runner
        .execute()
        .with_context(|| format!("Failed to execute script: {}", args.script.display()))?;

    print_report(&report);

    if let Some(path) = &args.report {
        std::fs::write(path, report.to_json()?)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        println!("Report written to: {}", path.display());
    }

    if !report.passed() {
        bail!("{} assertion(s) failed", report.summary.assertions_failed);
    }
    Ok(())
}

fn print_report(report: &ExecutionReport) {
    println!("=== {} ===", report.script.as_deref().unwrap_or("script"));
    println!("Figure: {}", report.figure);
    println!("Seed: {}", report.seed);
    println!("Frames: {}/{}", report.frames_executed, report.total_frames);
    if report.exit_requested {
        println!("Exit requested before the last frame");
    }
    println!("Snapshots: {}", report.summary.frames_with_snap);

    for result in report.assertions.iter().filter(|r| !r.passed) {
        let actual = result
            .actual
            .map_or_else(|| "undefined".to_string(), |v| v.to_string());
        println!(
            "  FAIL frame {}: {} (actual {}, expected {})",
            result.frame,
            result.condition,
            actual,
            result.expected.as_deref().unwrap_or("?")
        );
    }

    println!(
        "Assertions: {} passed, {} failed - {}",
        report.summary.assertions_passed, report.summary.assertions_failed, report.summary.status
    );
}
