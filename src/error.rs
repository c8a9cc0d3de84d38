use thiserror::Error;

/// Failures of the ingestion → reshaping → analytics pipeline.
///
/// Ingestion variants (`Parse`, `MissingSheet`, `MissingColumn`, `Io`) are
/// terminal for the current load. Analytic variants only knock out the step
/// that raised them.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Could not read spreadsheet: {0}")]
    Parse(String),

    #[error("Worksheet '{0}' not found in workbook")]
    MissingSheet(String),

    #[error("Required column '{0}' not found in header row")]
    MissingColumn(String),

    #[error("Not enough data for {indicator}: need at least {required} years, found {found}")]
    InsufficientData {
        indicator: String,
        required: usize,
        found: usize,
    },

    #[error("Duplicate entry for {indicator} in year {year}")]
    DuplicateKey { indicator: String, year: i32 },

    #[error("Growth for {indicator} is undefined: value in {year} is zero")]
    ZeroBaseline { indicator: String, year: i32 },

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV export failed: {0}")]
    Export(#[from] csv::Error),
}

impl DashboardError {
    /// Whether this error aborts the whole load rather than one analytic step.
    pub fn is_ingestion(&self) -> bool {
        matches!(
            self,
            DashboardError::Parse(_)
                | DashboardError::MissingSheet(_)
                | DashboardError::MissingColumn(_)
                | DashboardError::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
