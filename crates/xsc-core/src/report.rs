//! The merged CSV report: row type, writer and reader

use crate::error::{Error, Result};
use crate::lookup::LookupRecord;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Header line of every report
pub const REPORT_HEADER: [&str; 5] = [
    "DM_ID",
    "MPM_ID",
    "Carrier_Integration_Code",
    "Carrier_Integration_Name",
    "MPM4DM",
];

/// One merged row: a lookup record plus the tag of the file the unit came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    pub dm_id: String,
    pub mpm_id: String,
    pub code: String,
    pub name: String,
    /// Source tag, e.g. "MPM4DM01"
    pub tag: String,
}

impl OutputRow {
    /// Combine a matched (or fallback) record with a source tag
    pub fn new(record: LookupRecord, tag: impl Into<String>) -> Self {
        Self {
            dm_id: record.dm_id,
            mpm_id: record.mpm_id,
            code: record.code,
            name: record.name,
            tag: tag.into(),
        }
    }

    /// Fields in report column order
    pub fn to_record(&self) -> [&str; 5] {
        [
            self.dm_id.as_str(),
            self.mpm_id.as_str(),
            self.code.as_str(),
            self.name.as_str(),
            self.tag.as_str(),
        ]
    }

    /// Short form for listings; the MPM id is left out
    pub fn display_line(&self) -> String {
        format!("{} | {} | {} | {}", self.dm_id, self.code, self.name, self.tag)
    }
}

/// Write rows to `path` under the fixed report header
pub fn write_report<P: AsRef<Path>>(path: P, rows: &[OutputRow]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::from_io(path, e))?;
    write_rows(BufWriter::new(file), rows).map_err(|e| Error::Csv {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_rows<W: Write>(writer: W, rows: &[OutputRow]) -> csv::Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    csv_writer.write_record(REPORT_HEADER)?;
    for row in rows {
        csv_writer.write_record(row.to_record())?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Read a previously written report back into rows
pub fn read_report<P: AsRef<Path>>(path: P) -> Result<Vec<OutputRow>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::from_io(path, e))?;
    read_rows(BufReader::new(file), path)
}

fn read_rows<R: Read>(reader: R, path: &Path) -> Result<Vec<OutputRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(|e| Error::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;

        // Pad short rows with empty cells
        let cell = |i: usize| record.get(i).unwrap_or_default().to_string();
        rows.push(OutputRow {
            dm_id: cell(0),
            mpm_id: cell(1),
            code: cell(2),
            name: cell(3),
            tag: cell(4),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(dm: &str, code: &str, tag: &str) -> OutputRow {
        OutputRow::new(LookupRecord::new(code, "Carrier", dm, "200"), tag)
    }

    #[test]
    fn test_write_header_and_rows() {
        let mut buf = Vec::new();
        write_rows(&mut buf, &[row("100", "C1", "MPM4DM01")]).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "DM_ID,MPM_ID,Carrier_Integration_Code,Carrier_Integration_Name,MPM4DM\r\n\
             100,200,C1,Carrier,MPM4DM01\r\n"
        );
    }

    #[test]
    fn test_write_header_only_when_empty() {
        let mut buf = Vec::new();
        write_rows(&mut buf, &[]).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "DM_ID,MPM_ID,Carrier_Integration_Code,Carrier_Integration_Name,MPM4DM\r\n"
        );
    }

    #[test]
    fn test_write_quotes_commas() {
        let mut buf = Vec::new();
        let record = LookupRecord::new("C1", "Fast, Cheap", "1", "2");
        write_rows(&mut buf, &[OutputRow::new(record, "MPM4DM02")]).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with("1,2,C1,\"Fast, Cheap\",MPM4DM02\r\n"));
    }

    #[test]
    fn test_read_pads_short_rows() {
        let csv = "DM_ID,MPM_ID,Carrier_Integration_Code,Carrier_Integration_Name,MPM4DM\n100,200,C1\n";
        let rows = read_rows(csv.as_bytes(), Path::new("data.csv")).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].code, "C1");
        assert_eq!(rows[0].name, "");
        assert_eq!(rows[0].tag, "");
    }

    #[test]
    fn test_read_written_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let rows = vec![row("100", "C1", "MPM4DM01"), row("101", "C2", "MPM4DM02")];

        write_report(&path, &rows).unwrap();
        assert_eq!(read_report(&path).unwrap(), rows);
    }

    #[test]
    fn test_write_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("data.csv");

        let err = write_report(&path, &[]).unwrap_err();
        assert!(matches!(err, Error::NotFound(ref p) if p == &path));
        assert!(err.to_string().contains("data.csv"));
    }

    #[test]
    fn test_display_line_omits_mpm_id() {
        assert_eq!(row("100", "C1", "MPM4DM01").display_line(), "100 | C1 | Carrier | MPM4DM01");
    }
}
