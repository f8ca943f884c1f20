//! Merge driver: joins the active units of each input file with the export table
//! and writes the merged report

use crate::config::RunConfig;
use crate::error::Result;
use crate::extractor::read_active_units;
use crate::lookup::{load_lookup_table, LookupTable};
use crate::report::{write_report, OutputRow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Number of `DM0<i>.xscsys` files attempted per run
pub const INPUT_FILE_COUNT: usize = 5;

/// Prefix of every source tag
pub const TAG_PREFIX: &str = "MPM4";

/// What happened to one input file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    /// File name inside the input directory
    pub file: String,
    /// Tag written to the report for this file
    pub tag: String,
    /// Active units found
    pub units: usize,
    /// Units that matched a row of the export table
    pub matched: usize,
    /// Why the file contributed nothing, if it failed
    pub error: Option<String>,
}

/// Summary of a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// When the report was written
    pub generated_at: DateTime<Utc>,
    /// Report path
    pub output: PathBuf,
    /// Distinct keys in the export table
    pub lookup_entries: usize,
    /// Per-file outcomes, in processing order
    pub files: Vec<FileOutcome>,
}

impl RunReport {
    /// Rows written to the report
    pub fn total_rows(&self) -> usize {
        self.files.iter().map(|f| f.units).sum()
    }

    /// Files that failed to load
    pub fn failed_files(&self) -> Vec<&FileOutcome> {
        self.files.iter().filter(|f| f.error.is_some()).collect()
    }
}

/// The fixed input file names, `DM01.xscsys` through `DM05.xscsys`
pub fn expected_input_files() -> Vec<String> {
    (1..=INPUT_FILE_COUNT)
        .map(|i| format!("DM0{}.xscsys", i))
        .collect()
}

/// Tag identifying a source file in the report: "MPM4" + file stem
pub fn source_tag(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    format!("{}{}", TAG_PREFIX, stem)
}

/// One report row per unit; units are looked up by name, unmatched ones get N/A
pub fn merge_units(table: &LookupTable, tag: &str, units: &[String]) -> Vec<OutputRow> {
    units
        .iter()
        .map(|unit| OutputRow::new(table.resolve(unit), tag))
        .collect()
}

/// Run the whole pipeline and write the report
///
/// Unreadable inputs and a missing export table are logged and treated as
/// empty; only a failure to write the report is returned as an error.
pub fn run(config: &RunConfig) -> Result<RunReport> {
    let table = load_lookup_table(&config.lookup_table);
    if table.is_empty() {
        warn!(
            "export table {} has no entries, every unit will be N/A",
            config.lookup_table.display()
        );
    }

    let mut rows: Vec<OutputRow> = Vec::new();
    let mut files = Vec::with_capacity(INPUT_FILE_COUNT);

    for file_name in expected_input_files() {
        let path = config.input_dir.join(&file_name);
        let tag = source_tag(&file_name);

        let (units, failure) = match read_active_units(&path) {
            Ok(units) => (units, None),
            Err(e) => {
                error!("{}", e);
                (Vec::new(), Some(e.to_string()))
            }
        };

        let matched = units.iter().filter(|u| table.get(u).is_some()).count();
        info!(
            "{}: {} active unit(s), {} matched",
            file_name,
            units.len(),
            matched
        );

        rows.extend(merge_units(&table, &tag, &units));
        files.push(FileOutcome {
            file: file_name,
            tag,
            units: units.len(),
            matched,
            error: failure,
        });
    }

    write_report(&config.output, &rows)?;
    println!("Data saved to {}", config.output.display());

    Ok(RunReport {
        generated_at: Utc::now(),
        output: config.output.clone(),
        lookup_entries: table.len(),
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{parse_lookup_str, LookupRecord};

    #[test]
    fn test_expected_input_files() {
        assert_eq!(
            expected_input_files(),
            vec![
                "DM01.xscsys",
                "DM02.xscsys",
                "DM03.xscsys",
                "DM04.xscsys",
                "DM05.xscsys"
            ]
        );
    }

    #[test]
    fn test_source_tag() {
        assert_eq!(source_tag("DM01.xscsys"), "MPM4DM01");
        assert_eq!(source_tag("DM05.xscsys"), "MPM4DM05");
    }

    #[test]
    fn test_merge_matched_and_unmatched() {
        let csv = "Carrier integration code,Carrier integration name,DM id,MPM id\nC1,CarrierOne,100,200\n";
        let table = parse_lookup_str(csv, "export.csv").unwrap();
        let units = vec!["C1".to_string(), "Ghost".to_string(), "C1".to_string()];

        let rows = merge_units(&table, "MPM4DM01", &units);

        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0].to_record(),
            ["100", "200", "C1", "CarrierOne", "MPM4DM01"]
        );
        assert_eq!(rows[1], OutputRow::new(LookupRecord::fallback(), "MPM4DM01"));
        assert_eq!(rows[2], rows[0]);
    }

    #[test]
    fn test_merge_looks_up_by_unit_name() {
        // Keyed by code; a unit named after the carrier name does not match
        let csv = "Carrier integration code,Carrier integration name,DM id,MPM id\nC1,CarrierOne,100,200\n";
        let table = parse_lookup_str(csv, "export.csv").unwrap();

        let rows = merge_units(&table, "MPM4DM02", &["CarrierOne".to_string()]);
        assert_eq!(rows[0].to_record(), ["N/A", "N/A", "N/A", "N/A", "MPM4DM02"]);
    }
}
