// ---------------------------------------------------------------------------
// Fixed dashboard settings
// ---------------------------------------------------------------------------

/// Every constant the dashboard depends on, passed explicitly into ingestion
/// and the pipeline.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Worksheet holding the indicator table.
    pub sheet_name: String,
    /// Sheet rows above the header row (World Bank preamble).
    pub header_skip_rows: u32,
    /// Column carrying the indicator names.
    pub indicator_column: String,
    /// Indicator used for the growth insight and the forecast.
    pub target_indicator: String,
    /// Indicators selected right after a file is loaded.
    pub default_selection: Vec<String>,
    /// Indicators whose most recent value is shown under "Key Insights".
    pub latest_value_indicators: Vec<String>,
    /// First forecast year.
    pub forecast_first_year: i32,
    /// Number of forecast years.
    pub forecast_horizon: u32,
    /// Rows shown in the cleaned-data preview.
    pub preview_rows: usize,
    /// Most indicators drawn in the trend chart.
    pub max_trend_lines: usize,
    /// Most indicators drawn on each axis of the correlation heatmap.
    pub max_heatmap_indicators: usize,
    /// Suggested name for the exported CSV.
    pub export_file_name: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            sheet_name: "Data".to_string(),
            header_skip_rows: 3,
            indicator_column: "Indicator Name".to_string(),
            target_indicator: "GDP (current US$)".to_string(),
            default_selection: vec![
                "GDP (current US$)".to_string(),
                "Population, total".to_string(),
            ],
            latest_value_indicators: vec![
                "CO2 emissions (metric tons per capita)".to_string(),
            ],
            forecast_first_year: 2025,
            forecast_horizon: 10,
            preview_rows: 20,
            max_trend_lines: 40,
            max_heatmap_indicators: 30,
            export_file_name: "nigerian_cleaned_data.csv".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Years covered by the forecast, inclusive.
    pub fn forecast_years(&self) -> impl Iterator<Item = i32> {
        let first = self.forecast_first_year;
        (0..self.forecast_horizon as i32).map(move |offset| first + offset)
    }

    /// Last forecast year (first year when the horizon is empty).
    pub fn forecast_last_year(&self) -> i32 {
        self.forecast_first_year + (self.forecast_horizon as i32 - 1).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_forecast_window_is_2025_through_2034() {
        let config = DashboardConfig::default();
        let years: Vec<i32> = config.forecast_years().collect();
        assert_eq!(years.len(), 10);
        assert_eq!(years.first(), Some(&2025));
        assert_eq!(years.last(), Some(&2034));
        assert_eq!(config.forecast_last_year(), 2034);
    }
}
