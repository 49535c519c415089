//! popsplit CLI - split a country/year/population CSV into per-country files.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use staffdir_observability::LogFormat;
use staffdir_popsplit::{Route, default_routes, split_file};

#[derive(Parser)]
#[command(name = "popsplit")]
#[command(about = "Split a country,year,population CSV into one file per country")]
struct Args {
    /// Input CSV (header: country,year,population)
    #[arg(short, long, default_value = "./input_countries.csv")]
    input: PathBuf,

    /// Directory the per-country files are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Routing as <Country>=<file>; repeatable. Replaces the defaults
    /// (Canada=canada.txt, "United States=usa.txt").
    #[arg(long = "route", value_parser = parse_route)]
    routes: Vec<Route>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_route(s: &str) -> Result<Route, String> {
    s.parse().map_err(|e: staffdir_popsplit::SplitError| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    staffdir_observability::tracing::init(
        LogFormat::Pretty,
        if args.verbose { "debug" } else { "warn" },
    );

    let routes = if args.routes.is_empty() {
        default_routes()
    } else {
        args.routes
    };

    let report = split_file(&args.input, &args.out_dir, &routes)
        .with_context(|| format!("failed to split {}", args.input.display()))?;

    println!("Processing complete.");
    for (country, count) in &report.counts {
        println!("Total records for {country}: {count}");
    }

    Ok(())
}
