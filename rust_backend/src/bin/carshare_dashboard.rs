use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use std::path::PathBuf;

use carshare_metrics::algorithms::{DatePoint, GroupValue};
use carshare_metrics::api::{format_thousands, DashboardView};
use carshare_metrics::config::{DashboardConfig, DatasetSettings};
use carshare_metrics::core::BrandSelection;
use carshare_metrics::services::DashboardService;

/// Car-sharing dashboard: metrics over the trips, cars and cities datasets.
#[derive(Parser, Debug)]
#[command(name = "carshare-dashboard", version)]
struct Args {
    /// TOML configuration file (defaults to ./dashboard.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding trips.csv, cars.csv and cities.csv
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Only include trips of this brand (repeatable; overrides the config)
    #[arg(long = "brand", value_name = "NAME")]
    brands: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print the available brands and exit
    #[arg(long)]
    list_brands: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => DashboardConfig::from_file(path)?,
        None => DashboardConfig::from_default_location()?.unwrap_or_default(),
    };
    if let Some(dir) = &args.data_dir {
        config.datasets = DatasetSettings::in_dir(dir);
    }
    if !args.brands.is_empty() {
        config.filter.brands = args.brands.clone();
    }

    init_logging(args.log_level.as_deref().unwrap_or(&config.logging.level))?;
    info!("Datasets: {:?}", config.datasets);

    let service = DashboardService::from_config(&config);

    if args.list_brands {
        for brand in service.available_brands()? {
            println!("{}", brand);
        }
        return Ok(());
    }

    let selection = config.brand_selection();
    let view = service.render(&selection)?;

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&view.summary())
                .context("Failed to serialize metrics")?;
            println!("{}", json);
        }
        OutputFormat::Text => print_text(&view, &selection, config.preview.rows),
    }

    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let level: LevelFilter = level
        .parse()
        .with_context(|| format!("Invalid log level '{}'", level))?;
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
    Ok(())
}

fn print_text(view: &DashboardView, selection: &BrandSelection, preview_rows: usize) {
    let metrics = &view.metrics;

    println!("=== Car Sharing Dashboard ===");
    println!("Brands: {}", selection_label(selection));
    println!();
    println!("Total Trips:    {}", metrics.total_trips);
    println!("Total Distance: {} km", format_thousands(metrics.total_distance, 2));
    println!(
        "Top Car Model by Revenue: {}",
        metrics.top_model_by_revenue.as_deref().unwrap_or("-")
    );

    print_dates("Trips Over Time", &metrics.trips_over_time, |v| v.to_string());
    print_groups("Revenue Per Car Model", &metrics.revenue_per_model);
    print_dates(
        "Cumulative Revenue Growth Over Time",
        &metrics.cumulative_revenue_over_time,
        |v| format_thousands(*v, 2),
    );
    print_groups("Average Trip Duration by City (min)", &metrics.avg_trip_duration_by_city);

    println!();
    println!("--- Trips Preview ---");
    println!("{}", view.preview(preview_rows));
}

fn selection_label(selection: &BrandSelection) -> String {
    if selection.is_empty() {
        return "all".to_string();
    }
    let names: Vec<&str> = selection.iter().collect();
    names.join(", ")
}

fn print_dates<T>(title: &str, points: &[DatePoint<T>], fmt: impl Fn(&T) -> String) {
    println!();
    println!("--- {} ---", title);
    for point in points {
        println!("  {}  {}", point.date, fmt(&point.value));
    }
}

fn print_groups(title: &str, groups: &[GroupValue]) {
    println!();
    println!("--- {} ---", title);
    for group in groups {
        let key = group.key.as_deref().unwrap_or("(unknown)");
        println!("  {:<20} {}", key, format_thousands(group.value, 2));
    }
}
