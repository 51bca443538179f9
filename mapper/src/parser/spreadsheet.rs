//! Workbook reading (xlsx, xlsm, xlsb, xls, ods) via calamine.

use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

use super::Table;
use crate::error::{LoadError, LoadResult};

/// File extensions read as workbooks.
pub const WORKBOOK_EXTENSIONS: [&str; 6] = ["xlsx", "xlsm", "xlsb", "xls", "xla", "ods"];

/// Text of a cell, `None` for empty and error cells.
///
/// Whole floats print without a fractional part (`1.0` -> `"1"`).
fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

fn range_to_table(range: &Range<Data>, path: &Path) -> LoadResult<Table> {
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let mut rows = range.rows();

    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| LoadError::parse(path, "worksheet is empty"))?
        .iter()
        .map(|cell| cell_text(cell).map(|s| super::clean_header(&s)).unwrap_or_default())
        .collect();

    let rows = rows
        .enumerate()
        // +1 for the header row, +1 for 1-based numbering
        .map(|(i, cells)| (first_row + i + 2, cells.iter().map(cell_text).collect()))
        .collect();

    Ok(Table { headers, rows })
}

/// Read one worksheet of a workbook. The first sheet is used when `sheet` is `None`.
///
/// Returns the table and the name of the sheet read.
pub fn read_workbook(path: &Path, sheet: Option<&str>) -> LoadResult<(Table, String)> {
    std::fs::metadata(path).map_err(|e| LoadError::io(path, e))?;

    let mut workbook = open_workbook_auto(path).map_err(|e| LoadError::parse(path, e))?;
    let names = workbook.sheet_names();

    let name = match sheet {
        Some(wanted) => names
            .iter()
            .find(|n| n.as_str() == wanted)
            .cloned()
            .ok_or_else(|| {
                LoadError::schema(
                    path,
                    format!("no worksheet named '{}' (found: {})", wanted, names.join(", ")),
                )
            })?,
        None => names
            .first()
            .cloned()
            .ok_or_else(|| LoadError::schema(path, "workbook has no worksheets"))?,
    };

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| LoadError::parse(path, e))?;

    Ok((range_to_table(&range, path)?, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn write_workbook(path: &Path, sheet_name: &str, rows: &[&[&str]]) {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    worksheet.write_string(r as u32, c as u16, *value).unwrap();
                }
            }
        }
        workbook.save(path).unwrap();
    }

    #[test]
    fn test_read_first_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taxonomy.xlsx");
        write_workbook(
            &path,
            "eBird",
            &[
                &["SPECIES_CODE", "PRIMARY_COM_NAME", "SCI_NAME"],
                &["emu1", "Emu", "Dromaius novaehollandiae"],
                &["", "Spuhs", ""],
            ],
        );

        let (table, sheet) = read_workbook(&path, None).unwrap();
        assert_eq!(sheet, "eBird");
        assert_eq!(table.headers, vec!["SPECIES_CODE", "PRIMARY_COM_NAME", "SCI_NAME"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].0, 2);
        assert_eq!(table.rows[0].1[0].as_deref(), Some("emu1"));
        assert_eq!(table.rows[1].1[0], None);
    }

    #[test]
    fn test_named_sheet_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taxonomy.xlsx");
        write_workbook(&path, "Sheet1", &[&["a"], &["1"]]);

        let err = read_workbook(&path, Some("Taxonomy")).unwrap_err();
        assert!(matches!(err, LoadError::Schema { .. }));
        assert!(err.to_string().contains("Taxonomy"));
    }

    #[test]
    fn test_missing_workbook() {
        let err = read_workbook(Path::new("/nonexistent/taxonomy.xlsx"), None).unwrap_err();
        assert!(matches!(err, LoadError::MissingFile { .. }));
    }

    #[test]
    fn test_corrupt_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"this is not a zip archive").unwrap();

        let err = read_workbook(&path, None).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(cell_text(&Data::String("  ".into())), None);
        assert_eq!(cell_text(&Data::String(" emu1 ".into())).as_deref(), Some("emu1"));
        assert_eq!(cell_text(&Data::Int(42)).as_deref(), Some("42"));
        assert_eq!(cell_text(&Data::Float(3.0)).as_deref(), Some("3"));
    }
}
