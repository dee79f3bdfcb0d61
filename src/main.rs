use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use warpalign_dtw::{AbsoluteDifference, Alignment, Dtw, Parallelism, SquaredDifference};
use warpalign_report::{AlignmentReport, Grid};

const DEFAULT_X: [f64; 6] = [1.0, 2.0, 3.0, 3.0, 2.0, 1.0];
const DEFAULT_Y: [f64; 6] = [1.0, 1.0, 2.0, 3.0, 3.0, 2.0];

#[derive(Parser)]
#[command(name = "warpalign")]
#[command(about = "Align two numeric sequences with classical dynamic time warping")]
#[command(version)]
struct Cli {
    /// First sequence, comma-separated (defaults to 1,2,3,3,2,1)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    x: Option<Vec<f64>>,

    /// Second sequence, comma-separated (defaults to 1,1,2,3,3,2)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    y: Option<Vec<f64>>,

    /// Local cost function: "abs" or "squared"
    #[arg(long, default_value = "abs")]
    cost: String,

    /// Fill the cost matrix one anti-diagonal at a time on the thread pool
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Print a JSON report instead of the text grid
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Also write the JSON report to this file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Enable verbose (debug-level) logging
    #[arg(long)]
    verbose: bool,

    /// Log errors only
    #[arg(long)]
    quiet: bool,

    /// Number of threads for the parallel fill (defaults to all cores)
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
enum CostKind {
    Absolute,
    Squared,
}

fn parse_cost(s: &str) -> Result<CostKind> {
    match s {
        "abs" => Ok(CostKind::Absolute),
        "squared" => Ok(CostKind::Squared),
        other => anyhow::bail!("unknown cost function: {other} (expected abs or squared)"),
    }
}

fn align(x: &[f64], y: &[f64], cost: CostKind, parallelism: Parallelism) -> Result<Alignment> {
    let alignment = match cost {
        CostKind::Absolute => Dtw::with_cost(AbsoluteDifference)
            .with_parallelism(parallelism)
            .align(x, y),
        CostKind::Squared => Dtw::with_cost(SquaredDifference)
            .with_parallelism(parallelism)
            .align(x, y),
    };
    alignment.context("alignment failed")
}

/// Align the selected sequences and print the result to `out`.
fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let x = cli.x.clone().unwrap_or_else(|| DEFAULT_X.to_vec());
    let y = cli.y.clone().unwrap_or_else(|| DEFAULT_Y.to_vec());
    let cost = parse_cost(&cli.cost)?;
    let parallelism = if cli.parallel {
        Parallelism::AntiDiagonal
    } else {
        Parallelism::Sequential
    };
    info!(n = x.len(), m = y.len(), ?cost, ?parallelism, "aligning sequences");

    let alignment = align(&x, &y, cost, parallelism)?;
    info!(
        distance = alignment.distance(),
        path_len = alignment.path().len(),
        "alignment complete"
    );

    let report = AlignmentReport::new(&x, &y, &alignment)?;
    if let Some(path) = &cli.output {
        report
            .write_json(path)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
    }

    if cli.json {
        writeln!(out, "{}", report.to_json_pretty()?)?;
    } else {
        write!(out, "{}", Grid::new(&x, &y, alignment.matrix())?)?;
        writeln!(out, "Path: {}", alignment.path())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    // Configure Rayon thread pool
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    run(&cli, &mut io::stdout().lock())
}
