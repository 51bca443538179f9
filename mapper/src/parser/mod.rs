//! Input loading: the translation table and the taxonomy table.
//!
//! Taxonomy files are read into a generic [`Table`] (header row + cells) by
//! format, then the configured columns are picked out by header name so the
//! source may order its columns freely.

pub mod delimited;
pub mod spreadsheet;
pub mod translation;

use serde::Serialize;
use std::path::Path;

use crate::config::ColumnNames;
use crate::error::{LoadError, LoadResult};
use crate::models::RawRow;

pub use delimited::{decode_content, detect_delimiter, detect_encoding, parse_delimited};
pub use spreadsheet::read_workbook;
pub use translation::{load_translations, parse_translations};

/// Header row plus data rows as `(1-based source line, cells)`.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<(usize, Vec<Option<String>>)>,
}

/// Where the taxonomy rows came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SourceFormat {
    Workbook { sheet: String },
    Delimited { encoding: String, delimiter: char },
}

/// Result of loading the taxonomy table with metadata
#[derive(Debug, Clone)]
pub struct TaxonomyTable {
    /// Rows in source order, not yet validated
    pub rows: Vec<RawRow>,
    /// All column headers found in the source
    pub headers: Vec<String>,
    pub format: SourceFormat,
}

pub(crate) fn clean_header(raw: &str) -> String {
    raw.trim().trim_start_matches('\u{feff}').trim_matches('"').trim().to_string()
}

/// Load the taxonomy table, dispatching on the file extension.
///
/// Workbook formats are read with calamine (`sheet` picks the worksheet);
/// `.csv`, `.tsv` and `.txt` are read as delimited text.
pub fn load_taxonomy(
    path: impl AsRef<Path>,
    columns: &ColumnNames,
    sheet: Option<&str>,
) -> LoadResult<TaxonomyTable> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let (table, format) = if spreadsheet::WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        let (table, sheet) = read_workbook(path, sheet)?;
        (table, SourceFormat::Workbook { sheet })
    } else if matches!(extension.as_str(), "csv" | "tsv" | "txt") {
        let (table, encoding, delimiter) = delimited::read_delimited(path)?;
        (table, SourceFormat::Delimited { encoding, delimiter })
    } else {
        // Report a missing file before complaining about its name.
        std::fs::metadata(path).map_err(|e| LoadError::io(path, e))?;
        return Err(LoadError::parse(
            path,
            format!("unsupported taxonomy format '.{}'", extension),
        ));
    };

    let rows = extract_rows(&table, columns, path)?;
    Ok(TaxonomyTable {
        rows,
        headers: table.headers,
        format,
    })
}

/// Pick the configured columns out of a table by header name.
///
/// Fails with a schema error naming every required header that is absent.
pub fn extract_rows(table: &Table, columns: &ColumnNames, path: &Path) -> LoadResult<Vec<RawRow>> {
    let find = |name: &str| table.headers.iter().position(|h| h == name);

    let common = find(&columns.common_name);
    let scientific = find(&columns.scientific_name);
    let code = find(&columns.species_code);

    let (Some(common), Some(scientific), Some(code)) = (common, scientific, code) else {
        let missing: Vec<&str> = [
            (&columns.common_name, common),
            (&columns.scientific_name, scientific),
            (&columns.species_code, code),
        ]
        .into_iter()
        .filter(|(_, index)| index.is_none())
        .map(|(name, _)| name.as_str())
        .collect();

        return Err(LoadError::schema(
            path,
            format!(
                "missing column(s) {} (found: {})",
                missing.join(", "),
                table.headers.join(", ")
            ),
        ));
    };

    let cell = |cells: &[Option<String>], i: usize| cells.get(i).cloned().flatten();

    Ok(table
        .rows
        .iter()
        .map(|(line, cells)| RawRow {
            line: *line,
            common_name: cell(cells, common),
            scientific_name: cell(cells, scientific),
            species_code: cell(cells, code),
        })
        .collect())
}
