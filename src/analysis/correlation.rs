use std::collections::{BTreeMap, BTreeSet};

use crate::data::model::{CorrelationMatrix, LongRecord};
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Pivot: long records → year × indicator
// ---------------------------------------------------------------------------

/// Dense year × indicator grid. `columns[i][y]` is the value of
/// `indicators[i]` in `years[y]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct YearPivot {
    /// Ascending.
    pub years: Vec<i32>,
    /// Sorted.
    pub indicators: Vec<String>,
    pub columns: Vec<Vec<Option<f64>>>,
}

/// Pivot `records` by year. A second value for the same (year, indicator)
/// cell is rejected.
pub fn pivot_by_year(records: &[LongRecord]) -> Result<YearPivot> {
    let indicators: BTreeSet<&str> = records.iter().map(|r| r.indicator.as_str()).collect();
    let years: BTreeSet<i32> = records.iter().map(|r| r.year).collect();

    let indicator_idx: BTreeMap<&str, usize> =
        indicators.iter().enumerate().map(|(i, &n)| (n, i)).collect();
    let year_idx: BTreeMap<i32, usize> = years.iter().enumerate().map(|(i, &y)| (y, i)).collect();

    let mut columns = vec![vec![None; years.len()]; indicators.len()];
    for record in records {
        let cell = &mut columns[indicator_idx[record.indicator.as_str()]][year_idx[&record.year]];
        if cell.replace(record.value).is_some() {
            return Err(DashboardError::DuplicateKey {
                indicator: record.indicator.clone(),
                year: record.year,
            });
        }
    }

    Ok(YearPivot {
        years: years.into_iter().collect(),
        indicators: indicators.into_iter().map(str::to_string).collect(),
        columns,
    })
}

// ---------------------------------------------------------------------------
// Correlation matrix
// ---------------------------------------------------------------------------

/// Pairwise Pearson correlation of every indicator present in `records`.
///
/// Each pair uses only the years both indicators have. The diagonal is exactly
/// `1.0` for any indicator with at least two distinct values.
pub fn correlation_matrix(records: &[LongRecord]) -> Result<CorrelationMatrix> {
    let YearPivot {
        years,
        indicators,
        columns,
    } = pivot_by_year(records)?;

    let n = indicators.len();
    let mut values = vec![vec![None; n]; n];
    let (mut xs, mut ys) = (Vec::new(), Vec::new());

    for i in 0..n {
        for j in i..n {
            overlapping(&columns[i], &columns[j], &mut xs, &mut ys);
            let coefficient = pearson(&xs, &ys).map(|r| if i == j { 1.0 } else { r });
            values[i][j] = coefficient;
            values[j][i] = coefficient;
        }
    }

    log::debug!("Correlation matrix over {n} indicators and {} years", years.len());
    Ok(CorrelationMatrix { indicators, values })
}

/// Fill `xs`/`ys` with the values of the years where both columns are present.
fn overlapping(a: &[Option<f64>], b: &[Option<f64>], xs: &mut Vec<f64>, ys: &mut Vec<f64>) {
    xs.clear();
    ys.clear();
    for (x, y) in a.iter().zip(b) {
        if let (Some(x), Some(y)) = (x, y) {
            xs.push(*x);
            ys.push(*y);
        }
    }
}

/// Pearson coefficient, or `None` with fewer than two points or no variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denominator = var_x.sqrt() * var_y.sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return None;
    }
    Some((cov / denominator).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(name: &str, points: &[(i32, f64)]) -> Vec<LongRecord> {
        points
            .iter()
            .map(|&(year, value)| LongRecord::new(name, year, value))
            .collect()
    }

    #[test]
    fn test_perfect_linear_relation() {
        let mut records = series("A", &[(2000, 1.0), (2001, 2.0), (2002, 4.0), (2003, 7.0)]);
        records.extend(series("B", &[(2000, 5.0), (2001, 8.0), (2002, 14.0), (2003, 23.0)]));

        let matrix = correlation_matrix(&records).unwrap();
        assert_eq!(matrix.indicators, vec!["A", "B"]);
        assert!((matrix.get("A", "B").unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(matrix.get("A", "B"), matrix.get("B", "A"));
    }

    #[test]
    fn test_inverse_relation() {
        let mut records = series("A", &[(2000, 1.0), (2001, 2.0), (2002, 3.0)]);
        records.extend(series("B", &[(2000, 30.0), (2001, 20.0), (2002, 10.0)]));
        let r = correlation_matrix(&records).unwrap().get("A", "B").unwrap();
        assert!((r + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_indicator_is_identity() {
        let records = series("GDP (current US$)", &[(2000, 1.0), (2001, 3.0), (2002, 2.0)]);
        let matrix = correlation_matrix(&records).unwrap();
        assert_eq!(matrix.values, vec![vec![Some(1.0)]]);
    }

    #[test]
    fn test_pairs_use_shared_years_only() {
        let mut records = series("A", &[(2000, 1.0), (2001, 2.0), (2002, 3.0)]);
        records.extend(series("B", &[(2002, 5.0), (2003, 6.0)]));
        let matrix = correlation_matrix(&records).unwrap();
        // one shared year
        assert_eq!(matrix.get("A", "B"), None);
        assert_eq!(matrix.get("A", "A"), Some(1.0));
    }

    #[test]
    fn test_duplicate_cell_fails() {
        let mut records = series("A", &[(2000, 1.0), (2001, 2.0)]);
        records.push(LongRecord::new("A", 2001, 2.5));
        let err = correlation_matrix(&records).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::DuplicateKey { ref indicator, year: 2001 } if indicator == "A"
        ));
    }

    #[test]
    fn test_constant_series_has_no_coefficient() {
        assert_eq!(pearson(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]), None);
        assert_eq!(pearson(&[1.0], &[2.0]), None);
    }

    #[test]
    fn test_large_magnitudes_keep_their_coefficient() {
        let x = [1e100, 2e100, 3e100];
        let y = [2e100, 4e100, 6e100];
        let r = pearson(&x, &y).unwrap();
        assert!((r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pivot_is_dense_and_sorted() {
        let mut records = series("B", &[(2001, 2.0), (2000, 1.0)]);
        records.extend(series("A", &[(2001, 5.0)]));

        let pivot = pivot_by_year(&records).unwrap();
        assert_eq!(pivot.years, vec![2000, 2001]);
        assert_eq!(pivot.indicators, vec!["A", "B"]);
        assert_eq!(pivot.columns, vec![vec![None, Some(5.0)], vec![Some(1.0), Some(2.0)]]);
    }

    #[test]
    fn test_wide_selection() {
        // A full World Bank sheet: hundreds of indicators over 65 years.
        let records: Vec<LongRecord> = (0..400)
            .flat_map(|i| {
                (1960..2025).map(move |year| {
                    let t = (year - 1960) as f64;
                    let value = if i % 2 == 0 { t * (i + 1) as f64 } else { -t + i as f64 };
                    LongRecord::new(format!("Indicator {i:03}"), year, value)
                })
            })
            .collect();

        let matrix = correlation_matrix(&records).unwrap();
        assert_eq!(matrix.size(), 400);
        assert_eq!(matrix.get("Indicator 000", "Indicator 000"), Some(1.0));
        assert!((matrix.get("Indicator 000", "Indicator 002").unwrap() - 1.0).abs() < 1e-9);
        assert!((matrix.get("Indicator 000", "Indicator 001").unwrap() + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_records_give_empty_matrix() {
        assert_eq!(correlation_matrix(&[]).unwrap().size(), 0);
    }
}
