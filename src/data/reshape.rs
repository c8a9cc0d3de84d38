use super::model::{IndicatorSelection, LongRecord, RawTable};

// ---------------------------------------------------------------------------
// Wide → long
// ---------------------------------------------------------------------------

/// Coerce a column label to a year: any finite number, truncated toward zero.
pub fn parse_year(label: &str) -> Option<i32> {
    let year = label.trim().parse::<f64>().ok()?;
    if !year.is_finite() || year.abs() > i32::MAX as f64 {
        return None;
    }
    Some(year.trunc() as i32)
}

/// Melt the selected rows of `table` into cleaned [`LongRecord`]s.
///
/// Records come out column by column (all selected indicators for the first
/// year column, then the next column), keeping source row order within a
/// column. Columns whose label is not a number and cells without a value are
/// dropped.
pub fn melt(table: &RawTable, selection: &IndicatorSelection) -> Vec<LongRecord> {
    if selection.is_empty() {
        return Vec::new();
    }

    let rows: Vec<_> = table
        .rows
        .iter()
        .filter(|r| selection.contains(&r.indicator))
        .collect();

    if rows.is_empty() {
        return Vec::new();
    }

    let mut records = Vec::new();
    for (col_idx, label) in table.columns.iter().enumerate() {
        let Some(year) = parse_year(label) else {
            continue;
        };
        for row in &rows {
            if let Some(Some(value)) = row.values.get(col_idx) {
                records.push(LongRecord::new(row.indicator.clone(), year, *value));
            }
        }
    }

    log::debug!(
        "Melted {} indicators into {} records",
        rows.len(),
        records.len()
    );
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RawRow;

    fn table() -> RawTable {
        RawTable::new(
            vec![
                "Country Code".into(),
                "2019".into(),
                "2020.0".into(),
                "".into(),
            ],
            vec![
                RawRow {
                    indicator: "GDP (current US$)".into(),
                    values: vec![None, Some(1.0), None, Some(9.0)],
                },
                RawRow {
                    indicator: "Population, total".into(),
                    values: vec![Some(566.0), Some(2.0), Some(3.0), None],
                },
            ],
        )
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("1960"), Some(1960));
        assert_eq!(parse_year("2020.9"), Some(2020));
        assert_eq!(parse_year(" 2001 "), Some(2001));
        assert_eq!(parse_year("Country Name"), None);
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("NaN"), None);
    }

    #[test]
    fn test_melt_drops_non_years_and_blanks() {
        let selection = IndicatorSelection::new(["GDP (current US$)", "Population, total"]);
        let records = melt(&table(), &selection);

        assert_eq!(
            records,
            vec![
                LongRecord::new("GDP (current US$)", 2019, 1.0),
                LongRecord::new("Population, total", 2019, 2.0),
                LongRecord::new("Population, total", 2020, 3.0),
            ]
        );
    }

    #[test]
    fn test_melt_filters_selection() {
        let selection = IndicatorSelection::new(["Population, total"]);
        let records = melt(&table(), &selection);
        assert!(records.iter().all(|r| r.indicator == "Population, total"));
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_empty_selection_yields_nothing() {
        assert!(melt(&table(), &IndicatorSelection::default()).is_empty());
    }
}
