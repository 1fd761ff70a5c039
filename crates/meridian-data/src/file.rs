//! CSV-backed data sources for EOD loads and local development.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use meridian_core::{Date, HoldingRecord, PricePoint, PriceSeries, ReturnRecord};

use crate::error::DataError;
use crate::sources::{FundDataSource, PriceSource};

/// CSV row of a performance table. Column names follow the upstream
/// spreadsheet layout.
#[derive(Debug, Deserialize)]
struct PerformanceRow {
    date: String,
    cum_return: f64,
    benchmark_cum_return: f64,
}

/// CSV row of a holdings table. An empty sector field deserializes to `None`.
#[derive(Debug, Deserialize)]
struct HoldingRow {
    date: String,
    symbol: String,
    #[serde(default)]
    sector: Option<String>,
    weight: f64,
}

/// CSV row of a price table.
#[derive(Debug, Deserialize)]
struct PriceRow {
    symbol: String,
    date: String,
    close: f64,
}

/// CSV-based fund data source.
///
/// One pair of files per strategy under a data directory, named after the
/// strategy slug (lowercased, spaces to underscores):
/// `<slug>_performance.csv` and `<slug>_holdings.csv` - the upstream
/// worksheet-per-strategy layout as files. A missing performance file
/// means the strategy is unknown.
pub struct CsvFundSource {
    data_dir: PathBuf,
}

impl CsvFundSource {
    /// Create a source rooted at a data directory.
    #[must_use]
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    fn table_path(&self, strategy: &str, suffix: &str) -> PathBuf {
        let slug = strategy.to_lowercase().replace(' ', "_");
        self.data_dir.join(format!("{slug}_{suffix}.csv"))
    }
}

#[async_trait]
impl FundDataSource for CsvFundSource {
    async fn performance_rows(&self, strategy: &str) -> Result<Vec<ReturnRecord>, DataError> {
        let path = self.table_path(strategy, "performance");
        if !path.exists() {
            return Err(DataError::NotFound(strategy.to_string()));
        }

        let mut reader =
            csv::Reader::from_path(&path).map_err(|e| DataError::IoError(e.to_string()))?;

        let mut rows = Vec::new();
        for result in reader.deserialize() {
            let row: PerformanceRow = result.map_err(|e| DataError::ParseError(e.to_string()))?;
            rows.push(ReturnRecord {
                date: Date::parse(&row.date).map_err(|e| DataError::ParseError(e.to_string()))?,
                fund: row.cum_return,
                benchmark: row.benchmark_cum_return,
            });
        }
        Ok(rows)
    }

    async fn holdings_rows(&self, strategy: &str) -> Result<Vec<HoldingRecord>, DataError> {
        let path = self.table_path(strategy, "holdings");
        if !path.exists() {
            // A strategy may legitimately publish performance without
            // holdings; treat the missing table as empty.
            return Ok(Vec::new());
        }

        let mut reader =
            csv::Reader::from_path(&path).map_err(|e| DataError::IoError(e.to_string()))?;

        let mut rows = Vec::new();
        for result in reader.deserialize() {
            let row: HoldingRow = result.map_err(|e| DataError::ParseError(e.to_string()))?;
            rows.push(HoldingRecord {
                date: Date::parse(&row.date).map_err(|e| DataError::ParseError(e.to_string()))?,
                symbol: row.symbol,
                sector: row.sector.filter(|s| !s.is_empty()),
                weight: row.weight,
            });
        }
        Ok(rows)
    }
}

/// CSV-based price source for testing and EOD loads.
///
/// A single file with `symbol,date,close` rows. Serving a request filters
/// each symbol's points to the requested start date; symbols absent from
/// the file (or with no points in the window) are omitted, matching the
/// provider contract.
pub struct CsvPriceSource {
    series: HashMap<String, PriceSeries>,
}

impl CsvPriceSource {
    /// Load all price rows from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the file cannot be read or parsed.
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self, DataError> {
        let mut points: HashMap<String, Vec<PricePoint>> = HashMap::new();

        if file_path.as_ref().exists() {
            let mut reader = csv::Reader::from_path(file_path.as_ref())
                .map_err(|e| DataError::IoError(e.to_string()))?;

            for result in reader.deserialize() {
                let row: PriceRow = result.map_err(|e| DataError::ParseError(e.to_string()))?;
                let date =
                    Date::parse(&row.date).map_err(|e| DataError::ParseError(e.to_string()))?;
                points.entry(row.symbol).or_default().push(PricePoint {
                    date,
                    close: row.close,
                });
            }
        }

        let series = points
            .into_iter()
            .map(|(symbol, pts)| (symbol, PriceSeries::from_points(pts)))
            .collect();

        Ok(Self { series })
    }
}

#[async_trait]
impl PriceSource for CsvPriceSource {
    async fn adjusted_closes(
        &self,
        symbols: &[String],
        start: Date,
    ) -> Result<HashMap<String, PriceSeries>, DataError> {
        Ok(filter_series(&self.series, symbols, start))
    }
}

/// Restrict stored series to the requested symbols and window, omitting
/// symbols with nothing in range.
pub(crate) fn filter_series(
    series: &HashMap<String, PriceSeries>,
    symbols: &[String],
    start: Date,
) -> HashMap<String, PriceSeries> {
    symbols
        .iter()
        .filter_map(|symbol| {
            let full = series.get(symbol)?;
            let windowed: Vec<PricePoint> = full
                .points()
                .iter()
                .copied()
                .filter(|p| p.date >= start)
                .collect();
            if windowed.is_empty() {
                None
            } else {
                Some((symbol.clone(), PriceSeries::from_points(windowed)))
            }
        })
        .collect()
}
