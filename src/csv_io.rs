use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::domain::{RawRecord, StandardizedRecord};
use crate::error::Result;

/// Read the raw feed into ordered rows keyed by the header columns.
///
/// The reader is flexible: a row shorter than the header yields empty
/// strings for the missing trailing columns rather than an error.
pub fn read_raw_rows(path: &Path) -> Result<Vec<RawRecord>> {
    let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for result in reader.records() {
        let row = result?;
        let mut raw = RawRecord::new();
        for (i, column) in headers.iter().enumerate() {
            raw.insert(column.to_string(), row.get(i).unwrap_or("").to_string());
        }
        rows.push(raw);
    }

    info!("Read {} raw rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Write records under the given header, creating parent directories.
///
/// Fields absent from a record render as empty strings. Quoting is the
/// standard CSV scheme: values containing the delimiter or a double quote
/// are wrapped in double quotes with inner quotes doubled.
pub fn write_records(path: &Path, columns: &[&str], records: &[StandardizedRecord]) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let mut writer = WriterBuilder::new().from_path(path)?;
    writer.write_record(columns)?;
    for record in records {
        writer.write_record(columns.iter().map(|column| record.field(column)))?;
    }
    writer.flush()?;

    info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_read_keyed_by_header() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "acct,amt\n12345678,100.00\n87654321,5\n").unwrap();

        let rows = read_raw_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("acct").unwrap(), "12345678");
        assert_eq!(rows[1].get("amt").unwrap(), "5");
    }

    #[test]
    fn test_short_rows_pad_with_empty_strings() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "acct,cp,amt\n12345678\n").unwrap();

        let rows = read_raw_rows(file.path()).unwrap();
        assert_eq!(rows[0].get("acct").unwrap(), "12345678");
        assert_eq!(rows[0].get("cp").unwrap(), "");
        assert_eq!(rows[0].get("amt").unwrap(), "");
    }

    #[test]
    fn test_read_unquotes_standard_csv() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "memo\n\"wire, incoming\"\n\"said \"\"hold\"\"\"\n").unwrap();

        let rows = read_raw_rows(file.path()).unwrap();
        assert_eq!(rows[0].get("memo").unwrap(), "wire, incoming");
        assert_eq!(rows[1].get("memo").unwrap(), "said \"hold\"");
    }

    #[test]
    fn test_missing_input_file_is_an_error() {
        assert!(read_raw_rows(Path::new("no/such/feed.csv")).is_err());
    }

    #[test]
    fn test_write_quotes_commas_and_doubles_quotes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut record = StandardizedRecord::new();
        record.set("a", "plain".to_string());
        record.set("b", "has, comma".to_string());
        record.set("c", "has \"quotes\"".to_string());

        write_records(&path, &["a", "b", "c"], &[record]).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "a,b,c\nplain,\"has, comma\",\"has \"\"quotes\"\"\"\n");
    }

    #[test]
    fn test_write_renders_missing_fields_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut record = StandardizedRecord::new();
        record.set("a", "1".to_string());

        write_records(&path, &["a", "b"], &[record]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a,b\n1,\n");
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/output/out.csv");

        write_records(&path, &["a"], &[]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_rewrite_is_byte_identical() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("one.csv");
        let second = dir.path().join("two.csv");

        let mut record = StandardizedRecord::new();
        record.set("a", "x, y".to_string());
        record.set("b", "2".to_string());
        let records = vec![record];

        write_records(&first, &["a", "b"], &records).unwrap();
        write_records(&second, &["a", "b"], &records).unwrap();
        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }
}
