//! tercile CLI.
//!
//! Replicates single-sort tercile factors from a firm-month characteristic
//! panel and compares them with benchmark series.
//!
//! Usage: `tercile run --panel chars.parquet [--settings settings.json]`

use std::{path::PathBuf, process, time::Duration};

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::*;
use tercile::{
    model::{
        PanelSchema, ParquetPanel, PortfolioConstructor, ReplicationSettings, ValidationReport,
        load_benchmark, load_panel, run_batch, validate_series, write_series,
    },
    primitives::{Direction, FactorSpec, WeightingScheme},
    styles,
    traits::FactorConstructor,
    utils::{QualityChecks, validate_panel},
};
use tracing::info;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "tercile")]
#[command(about = "Replicate single-sort tercile equity factors", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replicate every configured factor under every configured scheme
    Run {
        /// Firm-month characteristic panel (parquet)
        #[arg(long)]
        panel: PathBuf,

        /// Replication settings (JSON); defaults to the six standard factors
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Override the output directory of the settings
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Construct a single factor series
    Construct {
        /// Factor name from the catalog, or the output name with --characteristic
        factor: String,

        /// Firm-month characteristic panel (parquet)
        #[arg(long)]
        panel: PathBuf,

        /// Weighting scheme (ew, vw or vw_cap)
        #[arg(long, default_value = "vw_cap")]
        scheme: String,

        /// Sort on this column instead of the catalog definition
        #[arg(long, requires = "direction")]
        characteristic: Option<String>,

        /// Long-short direction (long-high or long-low)
        #[arg(long, requires = "characteristic")]
        direction: Option<String>,

        /// Write the series to this parquet file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show the composition of each bucket over time
    Diagnose {
        /// Factor name from the catalog
        factor: String,

        /// Firm-month characteristic panel (parquet)
        #[arg(long)]
        panel: PathBuf,
    },

    /// Run data quality checks on a panel
    Check {
        /// Firm-month characteristic panel (parquet)
        #[arg(long)]
        panel: PathBuf,
    },

    /// Compare a replicated series with a benchmark CSV
    Validate {
        /// Replicated series (parquet, | eom | return |)
        series: PathBuf,

        /// Benchmark CSV with name, date and ret columns
        #[arg(long)]
        benchmark: PathBuf,

        /// Benchmark factor name
        #[arg(long)]
        factor: String,

        /// Correlation required to pass
        #[arg(long, default_value = "0.95")]
        threshold: f64,
    },

    /// Print the default replication settings as JSON
    Settings,
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { panel, settings, output } => run_replication(panel, settings, output),
        Commands::Construct { factor, panel, scheme, characteristic, direction, output } => {
            let spec = resolve_spec(&factor, characteristic, direction)?;
            let scheme: WeightingScheme = scheme.parse()?;
            construct(panel, &spec, scheme, output)
        }
        Commands::Diagnose { factor, panel } => {
            let spec = styles::find(&factor)?.spec();
            let composition = PortfolioConstructor::new().diagnose(&ParquetPanel::new(panel), &spec)?;
            println!("{composition}");
            Ok(())
        }
        Commands::Check { panel } => check(panel),
        Commands::Validate { series, benchmark, factor, threshold } => {
            let series = LazyFrame::scan_parquet(&series, ScanArgsParquet::default())?.collect()?;
            let benchmark = load_benchmark(&benchmark, &factor)?;
            print_validation(&validate_series(&series, &benchmark, &factor, threshold)?);
            Ok(())
        }
        Commands::Settings => {
            println!("{}", serde_json::to_string_pretty(&ReplicationSettings::default())?);
            Ok(())
        }
    }
}

fn resolve_spec(
    factor: &str,
    characteristic: Option<String>,
    direction: Option<String>,
) -> CliResult<FactorSpec> {
    match (characteristic, direction) {
        (Some(characteristic), Some(direction)) => {
            let direction: Direction = direction.parse()?;
            Ok(FactorSpec::new(characteristic, factor, direction))
        }
        _ => Ok(styles::find(factor)?.spec()),
    }
}

fn construct(
    panel: PathBuf,
    spec: &FactorSpec,
    scheme: WeightingScheme,
    output: Option<PathBuf>,
) -> CliResult<()> {
    let unit = FactorSpec { name: spec.replicated_name(scheme), ..spec.clone() };
    let mut series = PortfolioConstructor::new().construct(&ParquetPanel::new(panel), &unit, scheme)?;
    println!("{series}");

    if let Some(path) = output {
        write_series(&mut series, &path)?;
        info!(path = %path.display(), "series written");
    }
    Ok(())
}

fn check(panel: PathBuf) -> CliResult<()> {
    let schema = PanelSchema::default();
    // Sorting on market equity itself needs only the base columns.
    let spec = FactorSpec::new(schema.me.clone(), "market_equity", Direction::LongLow);
    let raw = load_panel(&ParquetPanel::new(panel), &schema, &spec)?;
    let report = validate_panel(raw, &QualityChecks::default())?;

    println!("Rows checked: {}", report.rows);
    if let Some(max_abs) = report.max_abs_return {
        println!("Max |return|: {:.2}%", max_abs * 100.0);
    }
    if report.is_clean() {
        println!("No data quality warnings.");
    } else {
        for warning in &report.warnings {
            println!("Warning: {warning}");
        }
    }
    Ok(())
}

fn run_replication(
    panel: PathBuf,
    settings: Option<PathBuf>,
    output: Option<PathBuf>,
) -> CliResult<()> {
    let mut settings = match settings {
        Some(path) => ReplicationSettings::from_json_file(&path)?,
        None => ReplicationSettings::default(),
    };
    if output.is_some() {
        settings.output_dir = output;
    }

    let pb = ProgressBar::new(settings.unit_count() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let source = ParquetPanel::new(panel);
    let report = run_batch(&PortfolioConstructor::new(), &source, &settings, |spec, scheme| {
        pb.set_message(format!("{} ({scheme})", spec.name));
        pb.inc(1);
    })?;
    pb.finish_with_message("done");

    for outcome in &report.outcomes {
        if let Some(validation) = &outcome.validation {
            print_validation(validation);
        }
    }

    println!("\n{}", "=".repeat(50));
    println!("{:^50}", "Final Replication Summary");
    println!("{}", "=".repeat(50));
    println!("{}", report.summary_table()?);

    if report.failures.is_empty() {
        Ok(())
    } else {
        for failure in &report.failures {
            eprintln!("Failed: {failure}");
        }
        Err(format!("{} of {} units failed", report.failures.len(), settings.unit_count()).into())
    }
}

fn print_validation(report: &ValidationReport) {
    let status = if report.passed() { "SUCCESS" } else { "FAILURE" };

    println!("\n{}", "=".repeat(40));
    println!("{:^40}", format!("VALIDATION REPORT: {}", report.factor));
    println!("{}", "=".repeat(40));
    println!("Replication Success Metric (> {:.2} Correlation)", report.threshold);
    println!("  - Time-Series Correlation: {:.4}", report.correlation);
    println!("  - Overlapping Months: {}", report.months);
    println!("  - Status: {status}");
    println!("{}", "-".repeat(40));
    println!("{:<24}{:>16}", "Mean (Replicated)", format!("{:.6}", report.replicated.mean));
    println!("{:<24}{:>16}", "Mean (Benchmark)", format!("{:.6}", report.benchmark.mean));
    println!(
        "{:<24}{:>16}",
        "Ann. Vol (Replicated)",
        format!("{:.6}", report.replicated.annualized_volatility)
    );
    println!(
        "{:<24}{:>16}",
        "Ann. Vol (Benchmark)",
        format!("{:.6}", report.benchmark.annualized_volatility)
    );
    println!("{}", "=".repeat(40));
}
