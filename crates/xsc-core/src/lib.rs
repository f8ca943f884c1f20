//! xsc-core: Core library for merging XSC business units with the carrier export table
//!
//! This library provides functionality to:
//! - Extract active business units from `DM0<i>.xscsys` XML files
//! - Load the carrier export table (`export.csv`) keyed by integration code
//! - Join each file's units with the table and write the merged CSV report
//! - Search a generated report

pub mod config;
pub mod error;
pub mod extractor;
pub mod lookup;
pub mod merger;
pub mod report;
pub mod search;

pub use config::RunConfig;
pub use error::{Error, Result};
pub use extractor::{extract_active_units, extract_active_units_str, read_active_units};
pub use lookup::{load_lookup_table, parse_lookup_str, read_lookup_table, LookupRecord, LookupTable};
pub use merger::{expected_input_files, merge_units, run, source_tag, FileOutcome, RunReport};
pub use report::{read_report, write_report, OutputRow, REPORT_HEADER};
pub use search::search_rows;
