//! Join taxonomy rows with the translation table.
//!
//! ```text
//! RawRow ──validate──▶ TaxonomyRow ──lookup──▶ "Emu(鸸鹋)" ──phonetic──▶ OutputRecord
//!    │                                    (miss: "")
//!    └──▶ SkippedRow (missing name or code)
//! ```

use serde::Serialize;

use crate::models::{OutputMapping, OutputRecord, RawRow, SkipReason, TaxonomyRow, TranslationTable};
use crate::phonetic::{extract_localized_name, to_phonetic, Romanizer};

/// A taxonomy row that produced no record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// 1-based line in the taxonomy source
    pub line: usize,
    pub reason: SkipReason,
}

/// Counters for one join.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// Taxonomy rows seen, valid or not
    pub rows_read: usize,
    /// Records in the final mapping
    pub records: usize,
    /// Valid rows whose name had a localized form
    pub translated: usize,
    /// Valid rows with no translation entry or no localized segment
    pub untranslated: usize,
    /// Valid rows that replaced an earlier row with the same name
    pub overwritten: usize,
    pub skipped: Vec<SkippedRow>,
}

impl RunReport {
    /// Get summary statistics
    pub fn summary(&self) -> String {
        format!(
            "{} rows read, {} records, {} translated, {} without translation, {} skipped, {} overwritten",
            self.rows_read,
            self.records,
            self.translated,
            self.untranslated,
            self.skipped.len(),
            self.overwritten
        )
    }
}

/// Result of joining all taxonomy rows
#[derive(Debug, Clone, Default)]
pub struct JoinResult {
    pub mapping: OutputMapping,
    pub report: RunReport,
}

/// Build the output record for one validated row.
pub fn join_row(
    row: &TaxonomyRow,
    translations: &TranslationTable,
    romanizer: &dyn Romanizer,
) -> OutputRecord {
    let localized = extract_localized_name(translations.get(&row.common_name));
    let phonetic = to_phonetic(romanizer, &localized);

    OutputRecord {
        pinyin: phonetic.full,
        initials: phonetic.initials,
        code: row.species_code.clone(),
        name: row.common_name.clone(),
        latin: row.scientific_name.clone().unwrap_or_default(),
    }
}

/// Join every taxonomy row into an output mapping keyed by common name.
///
/// Rows without a common name or species code are recorded in
/// `report.skipped` and never fail the join. Duplicate names: last row wins.
pub fn build(
    rows: &[RawRow],
    translations: &TranslationTable,
    romanizer: &dyn Romanizer,
) -> JoinResult {
    let mut result = JoinResult::default();

    for raw in rows {
        result.report.rows_read += 1;

        let row = match raw.validate() {
            Ok(row) => row,
            Err(reason) => {
                result.report.skipped.push(SkippedRow { line: raw.line, reason });
                continue;
            }
        };

        let record = join_row(&row, translations, romanizer);
        if record.pinyin.is_empty() {
            result.report.untranslated += 1;
        } else {
            result.report.translated += 1;
        }

        if result.mapping.insert(row.common_name, record).is_some() {
            result.report.overwritten += 1;
        }
    }

    result.report.records = result.mapping.len();
    result
}
