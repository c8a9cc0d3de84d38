//! Analytics over cleaned records.
//!
//! ```text
//!   Vec<LongRecord>
//!        │
//!        ├──► growth       two latest years of the target → % change
//!        ├──► correlation  year × indicator pivot → Pearson matrix
//!        └──► forecast     OLS line over the target → future years
//! ```

use std::collections::BTreeMap;

use crate::data::model::LongRecord;
use crate::error::{DashboardError, Result};

pub mod correlation;
pub mod forecast;
pub mod growth;

/// `(year, value)` pairs of one indicator, ascending by year.
///
/// A year that appears twice for the indicator is a [`DashboardError::DuplicateKey`].
pub fn indicator_series(records: &[LongRecord], indicator: &str) -> Result<Vec<(i32, f64)>> {
    let mut by_year: BTreeMap<i32, f64> = BTreeMap::new();
    for record in records.iter().filter(|r| r.indicator == indicator) {
        if by_year.insert(record.year, record.value).is_some() {
            return Err(DashboardError::DuplicateKey {
                indicator: indicator.to_string(),
                year: record.year,
            });
        }
    }
    Ok(by_year.into_iter().collect())
}

/// Every indicator's `(year, value)` pairs, ascending by year, built in one
/// pass. Repeated years are kept.
pub fn group_series(records: &[LongRecord]) -> BTreeMap<String, Vec<(i32, f64)>> {
    let mut groups: BTreeMap<String, Vec<(i32, f64)>> = BTreeMap::new();
    for record in records {
        match groups.get_mut(record.indicator.as_str()) {
            Some(points) => points.push((record.year, record.value)),
            None => {
                groups.insert(record.indicator.clone(), vec![(record.year, record.value)]);
            }
        }
    }
    for points in groups.values_mut() {
        points.sort_by_key(|&(year, _)| year);
    }
    groups
}
