//! Split a `country,year,population` CSV into one file per country.

use std::fs::File;
use std::io::{BufWriter, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Header written at the top of every output file.
pub const OUTPUT_HEADER: [&str; 3] = ["country", "year", "population"];

#[derive(Debug, Error)]
pub enum SplitError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid route {0:?} (expected <Country>=<file>)")]
    InvalidRoute(String),

    #[error("two routes write to {0}")]
    DuplicateOutput(PathBuf),
}

/// Send rows for `country` (case-insensitive) to `file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub country: String,
    pub file: PathBuf,
}

impl Route {
    pub fn new(country: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            country: country.into(),
            file: file.into(),
        }
    }

    fn matches(&self, country: &str) -> bool {
        self.country.to_lowercase() == country.trim().to_lowercase()
    }
}

impl FromStr for Route {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (country, file) = s
            .split_once('=')
            .ok_or_else(|| SplitError::InvalidRoute(s.to_string()))?;
        let (country, file) = (country.trim(), file.trim());
        if country.is_empty() || file.is_empty() {
            return Err(SplitError::InvalidRoute(s.to_string()));
        }
        Ok(Route::new(country, file))
    }
}

/// Canada and the United States, as the splitter has always shipped.
pub fn default_routes() -> Vec<Route> {
    vec![
        Route::new("Canada", "canada.txt"),
        Route::new("United States", "usa.txt"),
    ]
}

#[derive(Debug, Deserialize)]
struct PopulationRow {
    country: String,
    year: String,
    population: String,
}

/// Rows written per route, in route order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReport {
    pub counts: Vec<(String, u64)>,
}

impl SplitReport {
    pub fn count_for(&self, country: &str) -> Option<u64> {
        self.counts
            .iter()
            .find(|(c, _)| c.eq_ignore_ascii_case(country))
            .map(|(_, n)| *n)
    }
}

/// Split the CSV file at `input` into `out_dir`.
pub fn split_file(input: &Path, out_dir: &Path, routes: &[Route]) -> Result<SplitReport, SplitError> {
    let file = File::open(input).map_err(|source| SplitError::Io {
        path: input.to_path_buf(),
        source,
    })?;
    split_reader(file, out_dir, routes)
}

/// Split CSV read from `input` into `out_dir`.
///
/// Every route's output file is recreated (header only) before the first
/// row is read, so an empty input still leaves header-only files behind.
/// Rows matching no route are skipped.
pub fn split_reader<R: Read>(
    input: R,
    out_dir: &Path,
    routes: &[Route],
) -> Result<SplitReport, SplitError> {
    let mut outputs: Vec<(PathBuf, csv::Writer<BufWriter<File>>, u64)> =
        Vec::with_capacity(routes.len());
    for route in routes {
        let path = out_dir.join(&route.file);
        if outputs.iter().any(|(p, _, _)| *p == path) {
            return Err(SplitError::DuplicateOutput(path));
        }

        let file = File::create(&path).map_err(|source| SplitError::Io {
            path: path.clone(),
            source,
        })?;
        let mut writer = csv::Writer::from_writer(BufWriter::new(file));
        writer.write_record(OUTPUT_HEADER)?;
        outputs.push((path, writer, 0u64));
    }

    // Fields are copied through untouched; only header names are trimmed.
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(input);
    for row in reader.deserialize::<PopulationRow>() {
        let row = row?;
        let Some(idx) = routes.iter().position(|r| r.matches(&row.country)) else {
            debug!(country = %row.country, "skipping unrouted row");
            continue;
        };
        let (_, writer, count) = &mut outputs[idx];
        writer.write_record([&row.country, &row.year, &row.population])?;
        *count += 1;
    }

    let mut counts = Vec::with_capacity(routes.len());
    for (route, (path, mut writer, count)) in routes.iter().zip(outputs) {
        writer
            .flush()
            .map_err(|source| SplitError::Io { path, source })?;
        counts.push((route.country.clone(), count));
    }

    Ok(SplitReport { counts })
}
