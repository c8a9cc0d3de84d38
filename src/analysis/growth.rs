use super::indicator_series;
use crate::data::model::{GrowthInsight, LatestValue, LongRecord};
use crate::error::{DashboardError, Result};

/// Percentage change of `indicator` between its two most recent years.
///
/// Returns `Ok(None)` when the indicator has no records at all.
pub fn growth_insight(records: &[LongRecord], indicator: &str) -> Result<Option<GrowthInsight>> {
    let series = indicator_series(records, indicator)?;
    if series.is_empty() {
        return Ok(None);
    }

    let [.., (previous_year, previous_value), (latest_year, latest_value)] = series[..] else {
        return Err(DashboardError::InsufficientData {
            indicator: indicator.to_string(),
            required: 2,
            found: series.len(),
        });
    };

    if previous_value == 0.0 {
        return Err(DashboardError::ZeroBaseline {
            indicator: indicator.to_string(),
            year: previous_year,
        });
    }

    Ok(Some(GrowthInsight {
        indicator: indicator.to_string(),
        previous_year,
        previous_value,
        latest_year,
        latest_value,
        percent: (latest_value - previous_value) / previous_value * 100.0,
    }))
}

/// Most recent observation of `indicator`, if it has any.
pub fn latest_value(records: &[LongRecord], indicator: &str) -> Result<Option<LatestValue>> {
    let series = indicator_series(records, indicator)?;
    Ok(series.last().map(|&(year, value)| LatestValue {
        indicator: indicator.to_string(),
        year,
        value,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GDP: &str = "GDP (current US$)";

    #[test]
    fn test_two_point_growth_is_ten_percent() {
        let records = vec![LongRecord::new(GDP, 2020, 100.0), LongRecord::new(GDP, 2021, 110.0)];
        let insight = growth_insight(&records, GDP).unwrap().unwrap();
        assert!((insight.percent - 10.0).abs() < 1e-9);
        assert_eq!(format!("{:.2}%", insight.percent), "10.00%");
        assert_eq!((insight.previous_year, insight.latest_year), (2020, 2021));
    }

    #[test]
    fn test_uses_last_two_years_regardless_of_input_order() {
        let records = vec![
            LongRecord::new(GDP, 2022, 150.0),
            LongRecord::new(GDP, 1990, 1.0),
            LongRecord::new(GDP, 2021, 200.0),
        ];
        let insight = growth_insight(&records, GDP).unwrap().unwrap();
        assert!((insight.percent + 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_point_is_insufficient() {
        let records = vec![LongRecord::new(GDP, 2020, 100.0)];
        let err = growth_insight(&records, GDP).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::InsufficientData { required: 2, found: 1, .. }
        ));
    }

    #[test]
    fn test_absent_indicator_is_none() {
        let records = vec![LongRecord::new("Population, total", 2020, 1.0)];
        assert_eq!(growth_insight(&records, GDP).unwrap(), None);
    }

    #[test]
    fn test_zero_baseline() {
        let records = vec![LongRecord::new(GDP, 2020, 0.0), LongRecord::new(GDP, 2021, 5.0)];
        assert!(matches!(
            growth_insight(&records, GDP).unwrap_err(),
            DashboardError::ZeroBaseline { year: 2020, .. }
        ));
    }

    #[test]
    fn test_latest_value() {
        let records = vec![LongRecord::new("CO2", 2019, 0.6), LongRecord::new("CO2", 2018, 0.5)];
        let latest = latest_value(&records, "CO2").unwrap().unwrap();
        assert_eq!((latest.year, latest.value), (2019, 0.6));
        assert_eq!(latest_value(&records, "GDP").unwrap(), None);
    }
}
