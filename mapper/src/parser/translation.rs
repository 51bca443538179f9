//! Translation table loading.
//!
//! The table is a JSON object mapping English names to composite strings:
//!
//! ```json
//! { "Emu": "Emu(鸸鹋)", "Common Ostrich": "Common Ostrich(非洲鸵鸟)" }
//! ```

use serde_json::Value;
use std::path::Path;

use crate::error::{LoadError, LoadResult};
use crate::models::TranslationTable;

/// Load the translation table from a JSON file.
pub fn load_translations(path: impl AsRef<Path>) -> LoadResult<TranslationTable> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| LoadError::io(path, e))?;
    let content = String::from_utf8(bytes)
        .map_err(|e| LoadError::parse(path, format!("not valid UTF-8: {}", e)))?;
    parse_translations(&content, path)
}

/// Parse translation JSON. `path` is only used in error messages.
///
/// `null` values are treated as absent entries.
pub fn parse_translations(content: &str, path: &Path) -> LoadResult<TranslationTable> {
    let value: Value = serde_json::from_str(content.trim_start_matches('\u{feff}'))
        .map_err(|e| LoadError::parse(path, e))?;

    let Value::Object(entries) = value else {
        return Err(LoadError::schema(path, "expected a JSON object of name -> translation"));
    };

    let mut table = TranslationTable::new();
    for (english, composite) in entries {
        match composite {
            Value::String(s) => table.insert(english, s),
            Value::Null => {}
            other => {
                return Err(LoadError::schema(
                    path,
                    format!("entry '{}' is not a string (found {})", english, other),
                ))
            }
        }
    }

    Ok(table)
}
