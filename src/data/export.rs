use std::io::Write;
use std::path::Path;

use anyhow::Context;

use super::model::LongRecord;
use crate::error::Result;

/// Write `records` as UTF-8 CSV with an `Indicator Name,Year,Value` header.
pub fn write_csv<W: Write>(records: &[LongRecord], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(["Indicator Name", "Year", "Value"])?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// CSV export as bytes, ready to be saved.
pub fn to_csv_bytes(records: &[LongRecord]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(records, &mut buf)?;
    Ok(buf)
}

/// Save the cleaned records to `path`.
pub fn save_csv(path: &Path, records: &[LongRecord]) -> anyhow::Result<()> {
    let bytes = to_csv_bytes(records).context("encoding cleaned data as CSV")?;
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported {} records to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_rows() {
        let records = vec![
            LongRecord::new("GDP (current US$)", 2020, 100.0),
            LongRecord::new("Population, total", 2021, 2.5),
        ];
        let text = String::from_utf8(to_csv_bytes(&records).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Indicator Name,Year,Value");
        assert_eq!(lines[1], "GDP (current US$),2020,100.0");
        assert_eq!(lines[2], "\"Population, total\",2021,2.5");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_empty_export_is_header_only() {
        let text = String::from_utf8(to_csv_bytes(&[]).unwrap()).unwrap();
        assert_eq!(text, "Indicator Name,Year,Value\n");
    }
}
