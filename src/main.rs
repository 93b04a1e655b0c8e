#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::uninlined_format_args)]

mod analysis;
mod csv_reader;
mod structs;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use structs::{EnvError, Result, Table};

/// envscan - exploratory statistical analysis for environmental sensor logs
#[derive(Parser, Debug)]
#[command(name = "envscan")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a dataset and print its profile (shape, types, missing data)
    Inspect {
        /// Input CSV/TSV file
        #[arg(short, long)]
        csv: PathBuf,

        /// Treat input as TSV instead of CSV
        #[arg(long)]
        tsv: bool,
    },

    /// Run correlation, outlier and summary analysis, write report files
    Analyze {
        /// Input CSV/TSV file
        #[arg(short, long)]
        csv: PathBuf,

        /// Output directory for report files
        #[arg(short, long, default_value = "./report")]
        output_dir: PathBuf,

        /// Columns to analyze (default: every numeric column)
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,

        /// Columns excluded from analysis
        #[arg(long = "exclude", value_delimiter = ',', default_value = "ID")]
        excluded: Vec<String>,

        /// IQR fence multiplier
        #[arg(long, default_value = "1.5")]
        iqr_multiplier: f64,

        /// Minimum |r| reported as a strong correlation
        #[arg(long, default_value = "0.7")]
        strong_correlation: f64,

        /// Treat input as TSV instead of CSV
        #[arg(long)]
        tsv: bool,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Some(Commands::Inspect { csv, tsv }) => run_inspect(&csv, tsv),

        Some(Commands::Analyze {
            csv,
            output_dir,
            columns,
            excluded,
            iqr_multiplier,
            strong_correlation,
            tsv,
        }) => run_analyze(
            &csv,
            &output_dir,
            &columns,
            &analysis::pipeline::AnalysisConfig {
                excluded,
                iqr_multiplier,
            },
            strong_correlation,
            tsv,
        ),

        None => {
            eprintln!("No subcommand provided. Use 'envscan inspect' or 'envscan analyze'.");
            eprintln!("Run 'envscan --help' for usage information.");
            std::process::exit(1);
        }
    }
}

/// Load a dataset and print its profile
fn run_inspect(csv_path: &Path, tsv: bool) -> Result<()> {
    let table = load_table(csv_path, tsv)?;
    print!("{}", analysis::profile::profile(&table).render());
    Ok(())
}

/// Run the analysis pipeline and write report files
fn run_analyze(
    csv_path: &Path,
    output_dir: &Path,
    columns: &[String],
    config: &analysis::pipeline::AnalysisConfig,
    strong_correlation: f64,
    tsv: bool,
) -> Result<()> {
    let table = load_table(csv_path, tsv)?;

    std::fs::create_dir_all(output_dir)?;

    eprintln!("Running analysis pipeline...");
    let result = analysis::pipeline::run_pipeline(&table, columns, config)?;

    let thresholds = analysis::findings::FindingThresholds {
        strong_correlation,
        ..analysis::findings::FindingThresholds::default()
    };
    let findings = analysis::findings::evaluate(&result, &thresholds);

    eprintln!("Writing report files...");
    let summary = analysis::output::build_summary(csv_path, &table, &result, &findings);
    analysis::output::write_summary(output_dir, &summary)?;
    analysis::output::write_correlation(output_dir, &result.correlation)?;
    analysis::output::write_outliers(output_dir, &result.outliers)?;
    analysis::output::write_stats_json(output_dir, &table, &result)?;

    eprintln!("Report written to {}", output_dir.display());
    eprintln!("  - summary.txt");
    eprintln!("  - correlation.csv");
    eprintln!("  - outliers.csv");
    eprintln!("  - stats.json");

    Ok(())
}

fn load_table(csv_path: &Path, tsv: bool) -> Result<Table> {
    if !csv_path.exists() {
        return Err(EnvError::Config(format!(
            "CSV file not found: {}",
            csv_path.display()
        )));
    }

    eprintln!("Loading: {}", csv_path.display());
    let table = Table::from_file(csv_path, tsv)?;
    eprintln!(
        "Loaded {} rows x {} columns",
        table.row_count(),
        table.col_count()
    );
    Ok(table)
}
