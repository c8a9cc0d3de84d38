use super::indicator_series;
use crate::data::model::{ForecastPoint, ForecastSeries, LinearTrend, LongRecord};
use crate::error::{DashboardError, Result};

/// Ordinary least-squares fit of `value = slope * year + intercept`.
///
/// Needs at least two distinct years.
pub fn fit_linear(points: &[(i32, f64)]) -> Option<LinearTrend> {
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|&(x, _)| x as f64).sum::<f64>() / n;
    let mean_y = points.iter().map(|&(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    for &(x, y) in points {
        let dx = x as f64 - mean_x;
        cov += dx * (y - mean_y);
        var_x += dx * dx;
    }

    if var_x == 0.0 {
        return None;
    }

    let slope = cov / var_x;
    Some(LinearTrend {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

/// Fit the history of `indicator` and evaluate the line for each of `years`.
pub fn forecast(
    records: &[LongRecord],
    indicator: &str,
    years: impl IntoIterator<Item = i32>,
) -> Result<ForecastSeries> {
    let history = indicator_series(records, indicator)?;
    let trend = fit_linear(&history).ok_or_else(|| DashboardError::InsufficientData {
        indicator: indicator.to_string(),
        required: 2,
        found: history.len(),
    })?;

    let points = years
        .into_iter()
        .map(|year| ForecastPoint {
            year,
            predicted: trend.predict(year),
        })
        .collect();

    Ok(ForecastSeries {
        indicator: indicator.to_string(),
        history,
        trend,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const GDP: &str = "GDP (current US$)";

    #[test]
    fn test_two_point_extrapolation() {
        let records = vec![LongRecord::new(GDP, 2020, 100.0), LongRecord::new(GDP, 2021, 200.0)];
        let series = forecast(&records, GDP, 2025..=2034).unwrap();

        assert_eq!(series.trend.slope, 100.0);
        assert_eq!(series.trend.intercept, 100.0 - 100.0 * 2020.0);
        assert_eq!(series.points.len(), 10);
        assert_eq!(series.points[0], ForecastPoint { year: 2025, predicted: 600.0 });
        assert_eq!(series.points[9].year, 2034);
        assert!(series.is_growing());
    }

    #[test]
    fn test_least_squares_matches_manual_fit() {
        let points = [(2000, 1.0), (2001, 3.0), (2002, 2.0), (2003, 5.0)];
        let trend = fit_linear(&points).unwrap();
        // mean_x = 2001.5, mean_y = 2.75, Sxy = 5.5, Sxx = 5
        assert!((trend.slope - 1.1).abs() < 1e-12);
        assert!((trend.intercept - (2.75 - 1.1 * 2001.5)).abs() < 1e-9);
    }

    #[test]
    fn test_single_point_is_insufficient() {
        let records = vec![LongRecord::new(GDP, 2020, 100.0)];
        let err = forecast(&records, GDP, 2025..=2034).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::InsufficientData { required: 2, found: 1, .. }
        ));
    }

    #[test]
    fn test_declining_trend() {
        let records = vec![LongRecord::new(GDP, 2020, 5.0), LongRecord::new(GDP, 2021, 3.0)];
        assert!(!forecast(&records, GDP, [2025]).unwrap().is_growing());
    }
}
