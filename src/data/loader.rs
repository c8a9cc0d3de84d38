use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_from_rs, Data, Range, Reader, Xlsx, XlsxError};

use super::model::{RawRow, RawTable};
use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the indicator table from a workbook on disk.  Dispatch by extension.
///
/// Only `.xlsx` is read; legacy `.xls` files have to be converted first.
pub fn load_file(path: &Path, config: &DashboardConfig) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" | "xlsm" => {
            let bytes = std::fs::read(path)?;
            load_workbook(bytes, config)
        }
        other => Err(DashboardError::Parse(format!(
            "Unsupported file extension: .{other}"
        ))),
    }
}

/// Parse an in-memory `.xlsx` payload.
///
/// The header row is the first row below `config.header_skip_rows` sheet
/// rows of `config.sheet_name`; every row below it is one indicator.
pub fn load_workbook(bytes: Vec<u8>, config: &DashboardConfig) -> Result<RawTable> {
    let mut workbook: Xlsx<Cursor<Vec<u8>>> = open_workbook_from_rs(Cursor::new(bytes))
        .map_err(|e: XlsxError| DashboardError::Parse(e.to_string()))?;

    if !workbook
        .sheet_names()
        .iter()
        .any(|name| name == &config.sheet_name)
    {
        return Err(DashboardError::MissingSheet(config.sheet_name.clone()));
    }

    let range = workbook
        .worksheet_range(&config.sheet_name)
        .map_err(|e| DashboardError::Parse(e.to_string()))?;

    let table = table_from_range(&range, config)?;
    if table.is_empty() {
        log::warn!("Sheet '{}' has no indicator rows", config.sheet_name);
    }
    log::info!(
        "Sheet '{}': {} indicators, {} columns",
        config.sheet_name,
        table.len(),
        table.columns.len()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Range → RawTable
// ---------------------------------------------------------------------------

fn table_from_range(range: &Range<Data>, config: &DashboardConfig) -> Result<RawTable> {
    // The used range begins at the first non-empty row; skip rows count from
    // the top of the sheet.
    let first_row = range.start().map(|(row, _)| row).unwrap_or(0);
    let to_skip = config.header_skip_rows.saturating_sub(first_row) as usize;

    let mut rows = range.rows().skip(to_skip);

    let header: Vec<String> = rows
        .next()
        .ok_or_else(|| DashboardError::MissingColumn(config.indicator_column.clone()))?
        .iter()
        .map(header_label)
        .collect();

    let indicator_idx = header
        .iter()
        .position(|h| h == &config.indicator_column)
        .ok_or_else(|| DashboardError::MissingColumn(config.indicator_column.clone()))?;

    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != indicator_idx)
        .map(|(_, h)| h.clone())
        .collect();

    let mut table_rows = Vec::new();
    for (row_no, row) in rows.enumerate() {
        let indicator = match row.get(indicator_idx) {
            Some(Data::Empty) | None => String::new(),
            Some(cell) => cell.to_string(),
        };
        if indicator.trim().is_empty() {
            log::debug!("Skipping data row {row_no}: no indicator name");
            continue;
        }

        let values = (0..header.len())
            .filter(|i| *i != indicator_idx)
            .map(|i| row.get(i).and_then(cell_value))
            .collect();

        table_rows.push(RawRow { indicator, values });
    }

    Ok(RawTable::new(columns, table_rows))
}

/// Header cells become column labels; whole numbers lose their `.0`.
fn header_label(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Int(i) => i.to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Numeric content of a data cell, if any.
fn cell_value(cell: &Data) -> Option<f64> {
    let value = match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
