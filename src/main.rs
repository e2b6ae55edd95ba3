//! CLI entry point for the car metrics tool.
//!
//! Provides subcommands for running the full pipeline over a vehicle
//! listing CSV, or for producing the segment, fuel, and feature tables
//! individually.

use anyhow::Result;
use car_metrics::analyzers::features::feature_scores;
use car_metrics::analyzers::fuel::{
    avg_displacement_by_fuel, avg_price_by_fuel, displacement_price_pivot,
};
use car_metrics::analyzers::segments::{filter_makes, segment_averages};
use car_metrics::analyzers::types::{FeatureScoreRow, FuelPriceRow, PivotRow, SegmentRow};
use car_metrics::loader::{RawVehicle, load_vehicles};
use car_metrics::normalize::{Vehicle, normalize};
use car_metrics::output::{print_json, write_table};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "car_metrics")]
#[command(about = "A tool to derive aggregate tables from a vehicle listing CSV", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write all derived tables
    Analyze {
        /// Path to the vehicle listing CSV
        #[arg(value_name = "INPUT")]
        input: String,

        /// Directory to write the derived tables into
        #[arg(short, long, default_value = "tables")]
        output_dir: String,

        /// Body-type segment for the fuel/displacement tables
        #[arg(long, default_value = "MPV")]
        body_type: String,

        /// Models to score features for
        #[arg(long, value_delimiter = ',', default_value = "Ertiga,Eeco,Xl6")]
        models: Vec<String>,

        /// Optional: restrict the segment table to these makes
        #[arg(long, value_delimiter = ',')]
        makes: Option<Vec<String>>,

        /// Also log each table as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Average price per make/dimension/body-type combination
    Segments {
        #[arg(value_name = "INPUT")]
        input: String,

        /// CSV file to write the table to
        #[arg(short, long, default_value = "segments.csv")]
        output: String,

        /// Optional: restrict the table to these makes
        #[arg(long, value_delimiter = ',')]
        makes: Option<Vec<String>>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Fuel-type price and displacement tables for one body-type segment
    Fuel {
        #[arg(value_name = "INPUT")]
        input: String,

        #[arg(short, long, default_value = "tables")]
        output_dir: String,

        #[arg(long, default_value = "MPV")]
        body_type: String,

        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Feature scores for a set of competing models
    Features {
        #[arg(value_name = "INPUT")]
        input: String,

        /// CSV file to write the table to
        #[arg(short, long, default_value = "features.csv")]
        output: String,

        #[arg(long, value_delimiter = ',', default_value = "Ertiga,Eeco,Xl6")]
        models: Vec<String>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/car_metrics.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("car_metrics.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            output_dir,
            body_type,
            models,
            makes,
            json,
        } => run_analyze(&input, &output_dir, &body_type, &models, makes.as_deref(), json)?,
        Commands::Segments {
            input,
            output,
            makes,
            json,
        } => {
            let vehicles = load_normalized(&input)?;
            let rows = build_segments(&vehicles, makes.as_deref());
            write_table(&output, &rows)?;
            if json {
                print_json(&rows)?;
            }
            info!(output, rows = rows.len(), "Segment table written");
        }
        Commands::Fuel {
            input,
            output_dir,
            body_type,
            json,
        } => run_fuel(&input, &output_dir, &body_type, json)?,
        Commands::Features {
            input,
            output,
            models,
            json,
        } => {
            let raw = load_vehicles(&input)?;
            let mut rows = feature_scores(&raw, &models);
            sort_features(&mut rows);
            write_table(&output, &rows)?;
            if json {
                print_json(&rows)?;
            }
            info!(output, rows = rows.len(), "Feature table written");
        }
    }

    Ok(())
}

/// Runs every stage and writes the four derived tables into `output_dir`.
#[tracing::instrument(skip(models, makes, json))]
fn run_analyze(
    input: &str,
    output_dir: &str,
    body_type: &str,
    models: &[String],
    makes: Option<&[String]>,
    json: bool,
) -> Result<()> {
    let raw = load_vehicles(input)?;
    let vehicles = normalize(&raw);

    std::fs::create_dir_all(output_dir)?;

    let segments = build_segments(&vehicles, makes);
    write_table(&format!("{output_dir}/segments.csv"), &segments)?;

    let mut fuel_price = avg_price_by_fuel(&vehicles, body_type);
    sort_fuel_price(&mut fuel_price);
    write_table(&format!("{output_dir}/fuel_price.csv"), &fuel_price)?;

    let mut pivot = displacement_price_pivot(&vehicles, body_type);
    sort_pivot(&mut pivot);
    write_table(&format!("{output_dir}/displacement_price.csv"), &pivot)?;

    let mut features = feature_scores(&raw, models);
    sort_features(&mut features);
    write_table(&format!("{output_dir}/features.csv"), &features)?;

    if json {
        print_json(&segments)?;
        print_json(&fuel_price)?;
        print_json(&pivot)?;
        print_json(&features)?;
    }

    info!(
        input,
        output_dir,
        segment_rows = segments.len(),
        fuel_price_rows = fuel_price.len(),
        pivot_rows = pivot.len(),
        feature_rows = features.len(),
        generated_at = %Utc::now(),
        "Analysis complete"
    );
    Ok(())
}

/// Writes the three fuel views for one body-type segment.
#[tracing::instrument(skip(json))]
fn run_fuel(input: &str, output_dir: &str, body_type: &str, json: bool) -> Result<()> {
    let vehicles = load_normalized(input)?;

    std::fs::create_dir_all(output_dir)?;

    let mut prices = avg_price_by_fuel(&vehicles, body_type);
    sort_fuel_price(&mut prices);
    write_table(&format!("{output_dir}/fuel_price.csv"), &prices)?;

    let mut displacements = avg_displacement_by_fuel(&vehicles, body_type);
    displacements.sort_by(|a, b| {
        (&a.make, &a.model, &a.fuel_type).cmp(&(&b.make, &b.model, &b.fuel_type))
    });
    write_table(&format!("{output_dir}/fuel_displacement.csv"), &displacements)?;

    let mut pivot = displacement_price_pivot(&vehicles, body_type);
    sort_pivot(&mut pivot);
    write_table(&format!("{output_dir}/displacement_price.csv"), &pivot)?;

    if json {
        print_json(&prices)?;
        print_json(&displacements)?;
        print_json(&pivot)?;
    }

    info!(
        output_dir,
        body_type,
        price_rows = prices.len(),
        displacement_rows = displacements.len(),
        pivot_rows = pivot.len(),
        "Fuel tables written"
    );
    Ok(())
}

fn load_normalized(input: &str) -> Result<Vec<Vehicle>> {
    let raw: Vec<RawVehicle> = load_vehicles(input)?;
    Ok(normalize(&raw))
}

// The analyzers give no ordering guarantee; sort for stable output files.

fn build_segments(vehicles: &[Vehicle], makes: Option<&[String]>) -> Vec<SegmentRow> {
    let mut rows = segment_averages(vehicles);
    if let Some(makes) = makes {
        rows = filter_makes(rows, makes);
    }
    rows.sort_by(|a, b| {
        (&a.make, &a.body_type, &a.length, &a.width, &a.height)
            .cmp(&(&b.make, &b.body_type, &b.length, &b.width, &b.height))
    });
    rows
}

fn sort_fuel_price(rows: &mut [FuelPriceRow]) {
    rows.sort_by(|a, b| (&a.make, &a.model, &a.fuel_type).cmp(&(&b.make, &b.model, &b.fuel_type)));
}

fn sort_pivot(rows: &mut [PivotRow]) {
    rows.sort_by(|a, b| (&a.make, &a.model, &a.fuel_type).cmp(&(&b.make, &b.model, &b.fuel_type)));
}

fn sort_features(rows: &mut [FeatureScoreRow]) {
    rows.sort_by(|a, b| (&a.make, &a.model, &a.fuel_type).cmp(&(&b.make, &b.model, &b.fuel_type)));
}
