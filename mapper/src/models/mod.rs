//! Domain models for the mapping pipeline.
//!
//! - [`TranslationTable`] - English name to composite `English(Localized)` string
//! - [`RawRow`] - a taxonomy row as read, before validation
//! - [`TaxonomyRow`] - a validated, trimmed taxonomy row
//! - [`SkipReason`] - why a raw row was left out
//! - [`OutputRecord`] / [`OutputMapping`] - the emitted lookup table

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Translation Table
// =============================================================================

/// Lookup from English name to its composite `English(Localized)` string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationTable {
    entries: HashMap<String, String>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Composite string for an English name.
    pub fn get(&self, english: &str) -> Option<&str> {
        self.entries.get(english).map(String::as_str)
    }

    pub fn insert(&mut self, english: impl Into<String>, composite: impl Into<String>) {
        self.entries.insert(english.into(), composite.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TranslationTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// =============================================================================
// Taxonomy Rows
// =============================================================================

/// Why a taxonomy row produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    MissingCommonName,
    MissingSpeciesCode,
}

impl SkipReason {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::MissingCommonName => "missing common name",
            Self::MissingSpeciesCode => "missing species code",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// A row as read from the taxonomy table.
///
/// Cells are `None` when empty or absent in the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line (or sheet row) in the source, header included
    pub line: usize,
    pub common_name: Option<String>,
    pub scientific_name: Option<String>,
    pub species_code: Option<String>,
}

impl RawRow {
    /// Trim every cell and reject rows without a common name or species code.
    ///
    /// A whitespace-only cell counts as missing.
    pub fn validate(&self) -> Result<TaxonomyRow, SkipReason> {
        let common_name = non_blank(&self.common_name).ok_or(SkipReason::MissingCommonName)?;
        let species_code = non_blank(&self.species_code).ok_or(SkipReason::MissingSpeciesCode)?;

        Ok(TaxonomyRow {
            common_name,
            scientific_name: non_blank(&self.scientific_name),
            species_code,
        })
    }
}

fn non_blank(cell: &Option<String>) -> Option<String> {
    cell.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// A validated taxonomy row. All fields are trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyRow {
    pub common_name: String,
    pub scientific_name: Option<String>,
    pub species_code: String,
}

// =============================================================================
// Output
// =============================================================================

/// One entry of the emitted mapping.
///
/// Field order here is the serialized order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Full toneless spelling, e.g. `ermiao`
    pub pinyin: String,
    /// First letter of each syllable, e.g. `em`
    pub initials: String,
    /// Species code
    pub code: String,
    /// English common name
    pub name: String,
    /// Scientific name
    pub latin: String,
}

/// English name -> record, in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputMapping {
    records: IndexMap<String, OutputRecord>,
}

impl OutputMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the record for `name`, returning the previous one.
    ///
    /// An overwritten key keeps the position of its first insertion.
    pub fn insert(&mut self, name: impl Into<String>, record: OutputRecord) -> Option<OutputRecord> {
        self.records.insert(name.into(), record)
    }

    pub fn get(&self, name: &str) -> Option<&OutputRecord> {
        self.records.get(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OutputRecord)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }
}

// =============================================================================
// Tests
// =============================================================================
