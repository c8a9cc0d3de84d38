use std::collections::BTreeSet;

use serde::Serialize;

// ---------------------------------------------------------------------------
// RawTable – the sheet as loaded
// ---------------------------------------------------------------------------

/// One row of the source sheet: an indicator and its wide cells.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub indicator: String,
    /// Cell values aligned with [`RawTable::columns`]; `None` when the cell is
    /// blank or not numeric.
    pub values: Vec<Option<f64>>,
}

/// The "Data" sheet after ingestion.
///
/// Rows are indicators, columns are every header label other than the
/// indicator column. Year labels are still text at this point; non-year
/// columns such as "Country Code" are kept and discarded during reshaping.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<RawRow>) -> Self {
        RawTable { columns, rows }
    }

    /// Sorted, de-duplicated indicator names.
    pub fn indicator_names(&self) -> BTreeSet<String> {
        self.rows.iter().map(|r| r.indicator.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// IndicatorSelection
// ---------------------------------------------------------------------------

/// The indicators the user chose to analyse.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndicatorSelection {
    names: BTreeSet<String>,
}

impl IndicatorSelection {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        IndicatorSelection {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Keep only names that exist in `table`.
    pub fn restricted_to(self, table: &RawTable) -> Self {
        let available = table.indicator_names();
        IndicatorSelection {
            names: self
                .names
                .into_iter()
                .filter(|n| available.contains(n))
                .collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn remove(&mut self, name: &str) {
        self.names.remove(name);
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// ---------------------------------------------------------------------------
// LongRecord – one cleaned (indicator, year, value) triple
// ---------------------------------------------------------------------------

/// A melted observation. Cells without a value never become records, so the
/// value is always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongRecord {
    #[serde(rename = "Indicator Name")]
    pub indicator: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Value")]
    pub value: f64,
}

impl LongRecord {
    pub fn new(indicator: impl Into<String>, year: i32, value: f64) -> Self {
        LongRecord {
            indicator: indicator.into(),
            year,
            value,
        }
    }
}

// ---------------------------------------------------------------------------
// Analytic outputs
// ---------------------------------------------------------------------------

/// Year-over-year change of one indicator between its two latest years.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthInsight {
    pub indicator: String,
    pub previous_year: i32,
    pub previous_value: f64,
    pub latest_year: i32,
    pub latest_value: f64,
    /// `(latest - previous) / previous * 100`.
    pub percent: f64,
}

/// Most recent observation of an indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestValue {
    pub indicator: String,
    pub year: i32,
    pub value: f64,
}

/// Pairwise Pearson coefficients keyed by indicator name on both axes.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    /// Axis labels, sorted.
    pub indicators: Vec<String>,
    /// `values[i][j]` pairs `indicators[i]` with `indicators[j]`; `None` when
    /// the pair shares fewer than two years or one side is constant.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.indicators.len()
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.indicators.iter().position(|n| n == a)?;
        let j = self.indicators.iter().position(|n| n == b)?;
        self.values[i][j]
    }
}

/// Least-squares line `value = slope * year + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearTrend {
    pub fn predict(&self, year: i32) -> f64 {
        self.slope * year as f64 + self.intercept
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastPoint {
    pub year: i32,
    pub predicted: f64,
}

/// Fitted trend of the target indicator plus its extrapolation.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSeries {
    pub indicator: String,
    /// Observed `(year, value)` pairs, ascending by year.
    pub history: Vec<(i32, f64)>,
    pub trend: LinearTrend,
    pub points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    pub fn is_growing(&self) -> bool {
        self.trend.slope > 0.0
    }
}
