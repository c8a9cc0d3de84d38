use std::collections::BTreeMap;
use std::fmt;

use crate::analysis::{correlation, forecast, group_series, growth};
use crate::config::DashboardConfig;
use crate::data::model::{
    CorrelationMatrix, ForecastSeries, GrowthInsight, IndicatorSelection, LatestValue,
    LongRecord, RawTable,
};
use crate::data::reshape;
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Step outcomes
// ---------------------------------------------------------------------------

/// Why a step produced nothing to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The selection yielded no records.
    NoData,
    /// The step's indicator is not among the selected ones.
    NotSelected(String),
    /// The step's indicator is selected but has no values.
    NoValues(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NoData => write!(f, "No data for the current selection."),
            Notice::NotSelected(name) => write!(f, "{name} not selected"),
            Notice::NoValues(name) => write!(f, "No data for {name}"),
        }
    }
}

/// Result of one analytic step. Failures stay local to the step.
#[derive(Debug)]
pub enum Outcome<T> {
    Ready(T),
    Notice(Notice),
    Failed(DashboardError),
}

impl<T> Outcome<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Outcome::Ready(v) => Some(v),
            _ => None,
        }
    }

    fn from_step(step: &str, result: Result<T, DashboardError>) -> Self {
        match result {
            Ok(v) => Outcome::Ready(v),
            Err(e) => {
                log::warn!("{step} skipped: {e}");
                Outcome::Failed(e)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Everything the dashboard renders for one (table, selection) pair.
#[derive(Debug)]
pub struct DashboardReport {
    /// Cleaned long records, in melt order.
    pub records: Vec<LongRecord>,
    /// The same records grouped per indicator, ascending by year.
    pub series: BTreeMap<String, Vec<(i32, f64)>>,
    pub growth: Outcome<GrowthInsight>,
    /// Latest values of the configured "latest value" indicators that have
    /// records, keyed by indicator.
    pub latest: Vec<(String, Outcome<LatestValue>)>,
    pub correlation: Outcome<CorrelationMatrix>,
    pub forecast: Outcome<ForecastSeries>,
}

impl DashboardReport {
    /// Distinct indicators present in the cleaned records, sorted.
    pub fn indicators(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }
}

/// Reshape `table` for `selection` and run every analytic step.
pub fn run(
    table: &RawTable,
    selection: &IndicatorSelection,
    config: &DashboardConfig,
) -> DashboardReport {
    let records = reshape::melt(table, selection);
    let series = group_series(&records);
    let target = config.target_indicator.as_str();
    let target_present = series.contains_key(target);

    // Why the target step has nothing to work with.
    let target_notice = || {
        if records.is_empty() {
            Notice::NoData
        } else if selection.contains(target) {
            Notice::NoValues(target.to_string())
        } else {
            Notice::NotSelected(target.to_string())
        }
    };

    let growth = if !target_present {
        Outcome::Notice(target_notice())
    } else {
        match growth::growth_insight(&records, target) {
            Ok(Some(insight)) => Outcome::Ready(insight),
            Ok(None) => Outcome::Notice(target_notice()),
            Err(e) => Outcome::from_step("Growth insight", Err(e)),
        }
    };

    let latest = config
        .latest_value_indicators
        .iter()
        .filter(|name| series.contains_key(name.as_str()))
        .filter_map(|name| {
            let outcome = match growth::latest_value(&records, name) {
                Ok(Some(value)) => Outcome::Ready(value),
                Ok(None) => return None,
                Err(e) => Outcome::from_step(&format!("Latest value of {name}"), Err(e)),
            };
            Some((name.clone(), outcome))
        })
        .collect();

    let correlation = if records.is_empty() {
        Outcome::Notice(Notice::NoData)
    } else {
        Outcome::from_step("Correlation", correlation::correlation_matrix(&records))
    };

    let forecast = if !target_present {
        Outcome::Notice(target_notice())
    } else {
        Outcome::from_step(
            "Forecast",
            forecast::forecast(&records, target, config.forecast_years()),
        )
    };

    let report = DashboardReport {
        records,
        series,
        growth,
        latest,
        correlation,
        forecast,
    };
    log::debug!(
        "Pipeline: {} selected, {} records, growth {:?}",
        selection.len(),
        report.records.len(),
        report.growth.ready().map(|g| g.percent)
    );
    report
}
