//! `poseprobe` CLI: sample a simulated tracked transform and report medians.

use anyhow::Result;
use clap::{Parser, Subcommand};
use probe_core::report::output_file_path;
use probe_core::session::{RecordingSession, RunConfig};
use probe_core::summary::PositionMedians;
use sim::driver::SessionDriver;
use sim::scenarios::{Scenario, ScenarioKind};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Parser)]
#[command(name = "poseprobe", about = "Tracked-transform position sampler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect a fixed number of samples, then write the report.
    Record {
        #[arg(value_enum)]
        scenario: ScenarioKind,
        /// Number of samples to collect (host slider range)
        #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(10..=5000))]
        samples: u32,
        /// Report directory
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Report base filename
        #[arg(long, default_value = "trial")]
        base: String,
        /// Metadata tag appended to the filename
        #[arg(long, default_value = "")]
        metadata: String,
        /// Random seed for reproducibility
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Also write a JSON run summary
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Collect for a fixed number of simulated frames, then stop and summarize.
    Endless {
        #[arg(value_enum)]
        scenario: ScenarioKind,
        /// Simulated frames to run before stopping
        #[arg(long, default_value_t = 1000)]
        ticks: u64,
        /// Report directory
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Report base filename
        #[arg(long, default_value = "trial")]
        base: String,
        /// Metadata tag appended to the filename
        #[arg(long, default_value = "")]
        metadata: String,
        /// Random seed for reproducibility
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Also write a JSON run summary
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Record {
            scenario,
            samples,
            dir,
            base,
            metadata,
            seed,
            output,
        } => run_record(
            scenario,
            samples as usize,
            &dir,
            &base,
            &metadata,
            seed,
            output.as_deref(),
        ),
        Commands::Endless {
            scenario,
            ticks,
            dir,
            base,
            metadata,
            seed,
            output,
        } => run_endless(scenario, ticks, &dir, &base, &metadata, seed, output.as_deref()),
    }
}

fn capture_sink() -> (
    Box<dyn FnMut(&PositionMedians)>,
    Rc<RefCell<Option<PositionMedians>>>,
) {
    let result = Rc::new(RefCell::new(None));
    let inner = Rc::clone(&result);
    (Box::new(move |m: &PositionMedians| *inner.borrow_mut() = Some(*m)), result)
}

fn print_medians(medians: &PositionMedians) {
    println!("Pos x (mm): {:.3}", medians.x);
    println!("Pos y (mm): {:.3}", medians.y);
    println!("Pos z (mm): {:.3}", medians.z);
}

fn write_summary(
    path: &std::path::Path,
    scenario: &Scenario,
    seed: u64,
    samples: usize,
    medians: &PositionMedians,
    report_path: &std::path::Path,
    elapsed_s: f64,
) -> Result<()> {
    let json = serde_json::json!({
        "scenario": scenario.name,
        "seed": seed,
        "samples": samples,
        "median_x_mm": medians.x,
        "median_y_mm": medians.y,
        "median_z_mm": medians.z,
        "report": report_path.display().to_string(),
        "elapsed_s": elapsed_s,
    });
    std::fs::write(path, serde_json::to_string_pretty(&json)?)?;
    println!("Summary saved to {}", path.display());
    Ok(())
}

fn run_record(
    kind: ScenarioKind,
    samples: usize,
    dir: &std::path::Path,
    base: &str,
    metadata: &str,
    seed: u64,
    output: Option<&std::path::Path>,
) -> Result<()> {
    let scenario = Scenario::build(kind);
    let report_path = output_file_path(dir, base, metadata);
    let mut driver = SessionDriver::from_scenario(&scenario, seed);
    let mut session = RecordingSession::new();
    let (sink, result) = capture_sink();

    println!(
        "Recording {} samples on scenario '{}' (seed={})...",
        samples, scenario.name, seed
    );

    let start = std::time::Instant::now();
    let tool = driver.tool();
    session.start(
        driver.scene_mut(),
        tool,
        RunConfig::bounded(samples, &report_path),
        sink,
    )?;
    while session.is_collecting() {
        driver.tick(&mut session)?;
    }
    let elapsed = start.elapsed();

    let medians = result
        .borrow()
        .ok_or_else(|| anyhow::anyhow!("run ended without a result"))?;
    println!(
        "Done: {} samples, elapsed={:.2}s, report={}",
        samples,
        elapsed.as_secs_f64(),
        report_path.display()
    );
    print_medians(&medians);

    if let Some(opath) = output {
        write_summary(
            opath,
            &scenario,
            seed,
            samples,
            &medians,
            &report_path,
            elapsed.as_secs_f64(),
        )?;
    }

    Ok(())
}

fn run_endless(
    kind: ScenarioKind,
    ticks: u64,
    dir: &std::path::Path,
    base: &str,
    metadata: &str,
    seed: u64,
    output: Option<&std::path::Path>,
) -> Result<()> {
    let scenario = Scenario::build(kind);
    let report_path = output_file_path(dir, base, metadata);
    let mut driver = SessionDriver::from_scenario(&scenario, seed);
    let mut session = RecordingSession::new();
    let (sink, result) = capture_sink();

    println!(
        "Endless recording on scenario '{}' for {} ticks (seed={})...",
        scenario.name, ticks, seed
    );

    let start = std::time::Instant::now();
    let tool = driver.tool();
    session.start_endless(driver.scene_mut(), tool, &report_path, sink)?;
    for _ in 0..ticks {
        driver.tick(&mut session)?;
        if !session.is_collecting() {
            // hit the endless safety cap
            break;
        }
    }
    let samples = session.sample_count();
    session.stop_endless(driver.scene_mut())?;
    let elapsed = start.elapsed();

    let medians = result
        .borrow()
        .ok_or_else(|| anyhow::anyhow!("run ended without a result"))?;
    println!(
        "Done: {} samples, elapsed={:.2}s, report={}",
        samples,
        elapsed.as_secs_f64(),
        report_path.display()
    );
    print_medians(&medians);

    if let Some(opath) = output {
        write_summary(
            opath,
            &scenario,
            seed,
            samples,
            &medians,
            &report_path,
            elapsed.as_secs_f64(),
        )?;
    }

    Ok(())
}
