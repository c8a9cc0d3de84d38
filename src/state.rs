use std::path::Path;

use crate::color::IndicatorColors;
use crate::config::DashboardConfig;
use crate::data::loader;
use crate::data::model::{IndicatorSelection, RawTable};
use crate::error::DashboardError;
use crate::pipeline::{self, DashboardReport};

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Success(String),
    Error { message: String, hint: Option<String> },
}

const FORMAT_HINT: &str = "Try converting your .xls file to .xlsx format in Excel";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded indicator table (None until a workbook is opened).
    pub table: Option<RawTable>,

    /// File name of the loaded workbook.
    pub source_name: Option<String>,

    /// Indicators chosen in the side panel.
    pub selection: IndicatorSelection,

    /// Search text narrowing the indicator list.
    pub indicator_query: String,

    /// Pipeline output for the current table and selection.
    pub report: Option<DashboardReport>,

    /// Colours of the indicators in `report`.
    pub colors: IndicatorColors,

    /// Status / error message shown in the UI.
    pub status: Option<Status>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            table: None,
            source_name: None,
            selection: IndicatorSelection::default(),
            indicator_query: String::new(),
            report: None,
            colors: IndicatorColors::default(),
            status: None,
        }
    }

    /// Load a workbook from disk and make it the current table.
    pub fn load_path(&mut self, path: &Path) {
        match loader::load_file(path, &self.config) {
            Ok(table) => {
                log::info!("Loaded {} indicators from {}", table.len(), path.display());
                self.source_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned());
                self.set_table(table);
            }
            Err(e) => self.load_failed(e),
        }
    }

    /// Ingest a newly loaded table, apply the default selection and run.
    pub fn set_table(&mut self, table: RawTable) {
        self.selection =
            IndicatorSelection::new(self.config.default_selection.iter().cloned())
                .restricted_to(&table);
        self.table = Some(table);
        self.status = Some(Status::Success("File uploaded successfully!".to_string()));
        self.recompute();
    }

    /// Ingestion failed: drop everything from the previous file.
    pub fn load_failed(&mut self, err: DashboardError) {
        log::error!("Failed to load file: {err}");
        let hint = err.is_ingestion().then(|| FORMAT_HINT.to_string());
        self.table = None;
        self.source_name = None;
        self.report = None;
        self.selection = IndicatorSelection::default();
        self.status = Some(Status::Error {
            message: format!("Error reading file: {err}"),
            hint,
        });
    }

    /// Re-run the pipeline from scratch for the current table and selection.
    pub fn recompute(&mut self) {
        self.report = self
            .table
            .as_ref()
            .map(|table| pipeline::run(table, &self.selection, &self.config));
        self.colors = self
            .report
            .as_ref()
            .map(|r| IndicatorColors::new(r.indicators()))
            .unwrap_or_default();
    }

    /// Toggle one indicator in the selection.
    pub fn toggle_indicator(&mut self, name: &str) {
        if self.selection.contains(name) {
            self.selection.remove(name);
        } else {
            self.selection.insert(name);
        }
        self.recompute();
    }

    /// Select every indicator in the table.
    pub fn select_all(&mut self) {
        if let Some(table) = &self.table {
            self.selection = IndicatorSelection::new(table.indicator_names());
            self.recompute();
        }
    }

    /// Clear the selection.
    pub fn select_none(&mut self) {
        self.selection = IndicatorSelection::default();
        self.recompute();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RawRow;
    use crate::pipeline::Outcome;

    fn table() -> RawTable {
        let row = |name: &str, a: f64, b: f64| RawRow {
            indicator: name.into(),
            values: vec![Some(a), Some(b)],
        };
        RawTable::new(
            vec!["2020".into(), "2021".into()],
            vec![
                row("GDP (current US$)", 100.0, 110.0),
                row("Inflation, consumer prices (annual %)", 13.2, 16.9),
            ],
        )
    }

    #[test]
    fn test_default_selection_limited_to_available() {
        let mut state = AppState::default();
        state.set_table(table());

        assert_eq!(state.selection, IndicatorSelection::new(["GDP (current US$)"]));
        let report = state.report.as_ref().unwrap();
        assert_eq!(report.records.len(), 2);
        assert!(matches!(state.status, Some(Status::Success(_))));
    }

    #[test]
    fn test_toggle_and_clear_rerun_pipeline() {
        let mut state = AppState::default();
        state.set_table(table());

        state.toggle_indicator("Inflation, consumer prices (annual %)");
        assert_eq!(state.report.as_ref().unwrap().records.len(), 4);

        state.select_none();
        let report = state.report.as_ref().unwrap();
        assert!(report.records.is_empty());
        assert!(matches!(report.forecast, Outcome::Notice(_)));

        state.select_all();
        assert_eq!(state.selection.len(), 2);
    }

    #[test]
    fn test_load_path_reads_workbook() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Data").unwrap();
        sheet.write_string(3, 0, "Indicator Name").unwrap();
        sheet.write_number(3, 1, 2020.0).unwrap();
        sheet.write_number(3, 2, 2021.0).unwrap();
        sheet.write_string(4, 0, "GDP (current US$)").unwrap();
        sheet.write_number(4, 1, 100.0).unwrap();
        sheet.write_number(4, 2, 110.0).unwrap();

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nigeria.xlsx");
        workbook.save(&path).unwrap();

        let mut state = AppState::default();
        state.load_path(&path);

        assert_eq!(state.source_name.as_deref(), Some("nigeria.xlsx"));
        assert_eq!(state.report.as_ref().unwrap().records.len(), 2);
        assert!(matches!(state.status, Some(Status::Success(_))));
    }

    #[test]
    fn test_load_path_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut state = AppState::default();
        state.set_table(table());
        state.load_path(&dir.path().join("gone.xlsx"));

        assert!(state.table.is_none());
        assert!(matches!(
            state.status,
            Some(Status::Error { ref message, hint: Some(_) }) if message.starts_with("Error reading file")
        ));
    }

    #[test]
    fn test_load_failure_clears_previous_table() {
        let mut state = AppState::default();
        state.set_table(table());
        state.load_failed(DashboardError::MissingSheet("Data".into()));

        assert!(state.table.is_none());
        assert!(state.report.is_none());
        assert!(matches!(
            state.status,
            Some(Status::Error { hint: Some(_), .. })
        ));
    }
}
