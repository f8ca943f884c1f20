//! Run configuration: where the inputs live and where the report goes

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Paths for one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Directory holding `DM01.xscsys` .. `DM05.xscsys`
    pub input_dir: PathBuf,
    /// Carrier export table
    pub lookup_table: PathBuf,
    /// Merged report to write
    pub output: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            lookup_table: PathBuf::from("export.csv"),
            output: PathBuf::from("data.csv"),
        }
    }
}

impl RunConfig {
    /// Create a config from explicit paths
    pub fn new(
        input_dir: impl Into<PathBuf>,
        lookup_table: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            lookup_table: lookup_table.into(),
            output: output.into(),
        }
    }

    /// Load a config from JSON; missing fields keep their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::from_io(path, e))?;
        serde_json::from_str(&content).map_err(Error::Json)
    }

    /// Save the config to JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| Error::from_io(path, e))?;
        Ok(())
    }
}
