//! Run configuration.
//!
//! Every path and header name the pipeline touches lives here, so a run can
//! be pointed at temporary files in tests. Defaults match the eBird taxonomy
//! export and the `birdMap.json` translation table.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_TRANSLATIONS: &str = "birdMap.json";
pub const DEFAULT_TAXONOMY: &str = "eBird_taxonomy_v2025.xlsx";
pub const DEFAULT_OUTPUT: &str = "pinyin_mapping.json";
pub const DEFAULT_INDENT: usize = 4;

/// Header names of the taxonomy columns the join needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub common_name: String,
    pub scientific_name: String,
    pub species_code: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            common_name: "PRIMARY_COM_NAME".to_string(),
            scientific_name: "SCI_NAME".to_string(),
            species_code: "SPECIES_CODE".to_string(),
        }
    }
}

/// Options for one mapping run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// JSON object: English name -> "English(Localized)"
    pub translations: PathBuf,

    /// Taxonomy workbook or delimited text file
    pub taxonomy: PathBuf,

    /// Destination of the mapping
    pub output: PathBuf,

    /// Worksheet to read (first sheet if not set)
    pub sheet: Option<String>,

    pub columns: ColumnNames,

    /// Spaces per indentation level in the output
    pub indent: usize,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            translations: PathBuf::from(DEFAULT_TRANSLATIONS),
            taxonomy: PathBuf::from(DEFAULT_TAXONOMY),
            output: PathBuf::from(DEFAULT_OUTPUT),
            sheet: None,
            columns: ColumnNames::default(),
            indent: DEFAULT_INDENT,
        }
    }
}

impl MappingConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
