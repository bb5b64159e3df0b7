use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "solo workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the optional features, then re-run the first-access race tests
    /// many times to shake out ordering bugs
    Stress {
        /// How many times to run the suite
        #[arg(long, default_value_t = 20)]
        runs: u32,

        /// Build the tests with optimizations (reorders more aggressively)
        #[arg(long, default_value_t = false)]
        release: bool,
    },
    /// Run the access-path benchmarks and write a markdown summary
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,
    },
}

const STRESS_TESTS: &[&str] = &["lazy_shared_test", "failure_policy_test"];
const BENCH: &str = "get_instance_benchmark";
/// Non-default feature sets that must keep compiling.
const FEATURE_SETS: &[&str] = &["tracing"];

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Stress { runs, release } => run_stress(runs, release)?,
        Commands::Bench { quick, report_only } => {
            if !report_only {
                run_benchmarks(quick)?;
            }
            generate_report()?;
        }
    }

    Ok(())
}

fn cargo_test(release: bool) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.arg("test");
    if release {
        cmd.arg("--release");
    }
    for test in STRESS_TESTS {
        cmd.arg("--test").arg(test);
    }
    cmd
}

fn run_feature_checks() -> Result<()> {
    for features in FEATURE_SETS {
        println!("Checking all targets with features [{features}]...");
        let status = Command::new("cargo")
            .args(["check", "--all-targets", "--features", features])
            .status()
            .context("Failed to launch cargo check")?;
        if !status.success() {
            bail!("cargo check --features {features} failed");
        }
        let status = Command::new("cargo")
            .args(["test", "--lib", "--quiet", "--features", features])
            .status()
            .context("Failed to launch cargo test")?;
        if !status.success() {
            bail!("Unit tests with features [{features}] failed");
        }
    }
    Ok(())
}

fn run_stress(runs: u32, release: bool) -> Result<()> {
    run_feature_checks()?;

    println!("Compiling stress tests...");
    let status = cargo_test(release).arg("--no-run").status()?;
    if !status.success() {
        bail!("Failed to compile stress tests");
    }

    let start = Instant::now();
    for run in 1..=runs {
        let status = cargo_test(release)
            .arg("--quiet")
            .status()
            .with_context(|| format!("Failed to launch stress run {run}"))?;
        if !status.success() {
            bail!("Stress run {run}/{runs} failed");
        }
        println!("run {run}/{runs} ok");
    }

    println!("{runs} runs passed in {:.2?}", start.elapsed());
    Ok(())
}

fn run_benchmarks(quick: bool) -> Result<()> {
    println!("Running access-path benchmarks...");

    let mut cmd = Command::new("cargo");
    cmd.args(["bench", "--bench", BENCH, "--"]);
    if quick {
        // Aggressive settings for CI/Sandbox to avoid timeouts
        cmd.args(["--measurement-time", "0.5", "--noplot", "--sample-size", "10"]);
    }

    let start = Instant::now();
    let status = cmd.status().context("Failed to run benchmarks")?;
    if !status.success() {
        bail!("Benchmarks failed");
    }
    println!("Finished in {:.2?}", start.elapsed());
    Ok(())
}

#[derive(Deserialize)]
struct Estimates {
    mean: Estimate,
}

#[derive(Deserialize)]
struct Estimate {
    point_estimate: f64,
}

fn generate_report() -> Result<()> {
    println!("\n>>> Generating Report...");

    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    // group -> strategy -> mean ns
    let mut results: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    for group in fs::read_dir(criterion_dir)?.flatten() {
        let group_name = group.file_name().to_string_lossy().into_owned();
        if group_name == "report" || !group.path().is_dir() {
            continue;
        }
        for strategy in fs::read_dir(group.path())?.flatten() {
            let strategy_name = strategy.file_name().to_string_lossy().into_owned();
            let estimates = strategy.path().join("new").join("estimates.json");
            let Ok(content) = fs::read_to_string(&estimates) else {
                continue;
            };
            let parsed: Estimates = serde_json::from_str(&content)
                .with_context(|| format!("Malformed {}", estimates.display()))?;
            results
                .entry(group_name.clone())
                .or_default()
                .insert(strategy_name, parsed.mean.point_estimate);
        }
    }

    let report_path = Path::new("benchmark_results/report.md");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(report_path)?;

    writeln!(file, "# Access Path Benchmark Report")?;
    for (group, strategies) in &results {
        let fastest = strategies.values().copied().fold(f64::INFINITY, f64::min);

        writeln!(file, "\n## {group}\n")?;
        writeln!(file, "| Strategy | Mean | vs fastest |")?;
        writeln!(file, "|---|---|---|")?;
        for (strategy, ns) in strategies {
            let mean = if *ns > 1_000_000.0 {
                format!("{:.2} ms", ns / 1_000_000.0)
            } else if *ns > 1_000.0 {
                format!("{:.2} µs", ns / 1_000.0)
            } else {
                format!("{ns:.2} ns")
            };
            let rel = if fastest > 0.0 { ns / fastest } else { 0.0 };
            writeln!(file, "| {strategy} | {mean} | **{rel:.2}x** |")?;
        }
    }

    println!("Report written to {}", report_path.display());
    Ok(())
}
