//! Delimited text (CSV/TSV) reading with encoding and delimiter auto-detection.

use std::path::Path;

use super::Table;
use crate::error::{LoadError, LoadResult};

/// Delimiters tried by [`detect_delimiter`], in tie-break order.
const SEPARATORS: [char; 4] = [';', ',', '\t', '|'];

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        "gb2312" | "gbk" | "gb18030" => "gb18030".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string using the given encoding label.
///
/// Valid UTF-8 always wins; unknown labels fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.trim_start_matches('\u{feff}').to_string();
    }

    let decoded = match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::ISO_8859_15.decode(bytes).0,
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0,
        label => match encoding_rs::Encoding::for_label(label.as_bytes()) {
            Some(enc) => enc.decode(bytes).0,
            None => String::from_utf8_lossy(bytes),
        },
    };
    decoded.trim_start_matches('\u{feff}').to_string()
}

/// Detect the delimiter by counting occurrences in the first line
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &SEPARATORS {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse decoded delimited text into a [`Table`].
///
/// Blank lines are skipped; short rows read as missing trailing cells.
pub fn parse_delimited(content: &str, delimiter: char, path: &Path) -> LoadResult<Table> {
    let delimiter = u8::try_from(delimiter)
        .map_err(|_| LoadError::parse(path, format!("unsupported delimiter '{}'", delimiter)))?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::parse(path, e))?
        .iter()
        .map(super::clean_header)
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(LoadError::parse(path, "file is empty"));
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| LoadError::parse(path, e))?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(rows.len() + 2);
        let cells = record
            .iter()
            .map(|cell| {
                let cell = cell.trim();
                (!cell.is_empty()).then(|| cell.to_string())
            })
            .collect();
        rows.push((line, cells));
    }

    Ok(Table { headers, rows })
}

/// Read a delimited file, detecting encoding and delimiter.
///
/// Returns the table with the encoding and delimiter used.
pub fn read_delimited(path: &Path) -> LoadResult<(Table, String, char)> {
    let bytes = std::fs::read(path).map_err(|e| LoadError::io(path, e))?;

    let encoding = detect_encoding(&bytes);
    let content = decode_content(&bytes, &encoding);
    let delimiter = detect_delimiter(&content);

    let table = parse_delimited(&content, delimiter, path)?;
    Ok((table, encoding, delimiter))
}
