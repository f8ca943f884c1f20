//! Loader for the carrier export table (`export.csv`)

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Placeholder for any value the export table does not provide
pub const NOT_AVAILABLE: &str = "N/A";

/// Key column of the export table
pub const CODE_COLUMN: &str = "Carrier integration code";
pub const NAME_COLUMN: &str = "Carrier integration name";
pub const DM_ID_COLUMN: &str = "DM id";
pub const MPM_ID_COLUMN: &str = "MPM id";

/// One row of the export table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRecord {
    pub code: String,
    pub name: String,
    pub dm_id: String,
    pub mpm_id: String,
}

impl LookupRecord {
    /// Create a new record
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        dm_id: impl Into<String>,
        mpm_id: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            dm_id: dm_id.into(),
            mpm_id: mpm_id.into(),
        }
    }

    /// Record used when a unit has no match in the table
    pub fn fallback() -> Self {
        Self::new(NOT_AVAILABLE, NOT_AVAILABLE, NOT_AVAILABLE, NOT_AVAILABLE)
    }
}

/// Export table keyed by carrier integration code
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    records: HashMap<String, LookupRecord>,
    /// Source file path
    pub source_path: PathBuf,
}

impl LookupTable {
    /// Create a new empty table
    pub fn new(source_path: PathBuf) -> Self {
        Self {
            records: HashMap::new(),
            source_path,
        }
    }

    /// Insert a record under its code, replacing any earlier one
    pub fn insert(&mut self, record: LookupRecord) {
        self.records.insert(record.code.clone(), record);
    }

    /// Find a record by key
    pub fn get(&self, key: &str) -> Option<&LookupRecord> {
        self.records.get(key)
    }

    /// Find a record by key, or the N/A record when there is none
    pub fn resolve(&self, key: &str) -> LookupRecord {
        self.get(key).cloned().unwrap_or_else(LookupRecord::fallback)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read the export table from a CSV file
pub fn read_lookup_table<P: AsRef<Path>>(path: P) -> Result<LookupTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::from_io(path, e))?;
    parse_lookup(BufReader::new(file), path)
}

/// Like [`read_lookup_table`], but any failure is logged and yields an empty table
pub fn load_lookup_table<P: AsRef<Path>>(path: P) -> LookupTable {
    let path = path.as_ref();
    match read_lookup_table(path) {
        Ok(table) => table,
        Err(e) => {
            error!("{}", e);
            LookupTable::new(path.to_path_buf())
        }
    }
}

/// Parse the export table from a string (useful for testing)
pub fn parse_lookup_str(content: &str, source_name: &str) -> Result<LookupTable> {
    parse_lookup(content.as_bytes(), Path::new(source_name))
}

fn parse_lookup<R: Read>(reader: R, path: &Path) -> Result<LookupTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| Error::Csv {
            path: path.to_path_buf(),
            source: e,
        })?
        .clone();

    let code_idx = column_index(&headers, CODE_COLUMN);
    let name_idx = column_index(&headers, NAME_COLUMN);
    let dm_idx = column_index(&headers, DM_ID_COLUMN);
    let mpm_idx = column_index(&headers, MPM_ID_COLUMN);

    let mut table = LookupTable::new(path.to_path_buf());
    for (row_idx, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| Error::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;

        // An absent column reads as N/A; a short row fails the table
        let field = |idx: Option<usize>| -> Result<String> {
            let Some(i) = idx else {
                return Ok(NOT_AVAILABLE.to_string());
            };
            record
                .get(i)
                .map(|v| v.trim().to_string())
                .ok_or_else(|| Error::MissingCell {
                    path: path.to_path_buf(),
                    row: row_idx + 1,
                    column: headers.get(i).unwrap_or_default().to_string(),
                })
        };

        table.insert(LookupRecord {
            code: field(code_idx)?,
            name: field(name_idx)?,
            dm_id: field(dm_idx)?,
            mpm_id: field(mpm_idx)?,
        });
    }

    debug!("{} carrier(s) loaded from {}", table.len(), path.display());
    Ok(table)
}

/// Position of a named column; a repeated name resolves to its last occurrence
fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, h)| h.trim_start_matches('\u{feff}') == name)
        .map(|(i, _)| i)
        .last()
}
