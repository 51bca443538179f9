//! Output mapping serialization.
//!
//! The mapping is written as pretty JSON with non-ASCII text kept literal:
//!
//! ```json
//! {
//!     "Emu": {
//!         "pinyin": "ermiao",
//!         "initials": "em",
//!         "code": "emu1",
//!         "name": "Emu",
//!         "latin": "Dromaius novaehollandiae"
//!     }
//! }
//! ```

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EmitError, EmitResult, LoadError, LoadResult};
use crate::models::OutputMapping;

/// Serialize a mapping to pretty JSON using `indent` spaces per level.
pub fn to_json_bytes(mapping: &OutputMapping, indent: usize) -> EmitResult<Vec<u8>> {
    let indent = " ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());

    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    mapping.serialize(&mut serializer)?;
    buf.push(b'\n');

    Ok(buf)
}

/// Sibling file the output is staged in before the rename.
fn staging_path(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?.to_string_lossy();
    Some(path.with_file_name(format!(".{}.tmp", name)))
}

/// Write the mapping to `path`, replacing any previous file.
///
/// Content is written to a hidden sibling file and renamed into place, so a
/// failed run leaves an earlier output untouched.
pub fn write_mapping(mapping: &OutputMapping, path: impl AsRef<Path>, indent: usize) -> EmitResult<()> {
    let path = path.as_ref();
    let bytes = to_json_bytes(mapping, indent)?;

    let write_err = |source: std::io::Error| EmitError::Write {
        path: path.to_path_buf(),
        source,
    };

    let Some(staging) = staging_path(path) else {
        return fs::write(path, &bytes).map_err(write_err);
    };

    fs::write(&staging, &bytes)
        .and_then(|()| fs::rename(&staging, path))
        .map_err(|e| {
            let _ = fs::remove_file(&staging);
            write_err(e)
        })
}

/// Read a mapping previously written by [`write_mapping`].
pub fn read_mapping(path: impl AsRef<Path>) -> LoadResult<OutputMapping> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| LoadError::parse(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OutputRecord;

    fn sample() -> OutputMapping {
        let mut mapping = OutputMapping::new();
        mapping.insert(
            "Emu",
            OutputRecord {
                pinyin: "ermiao".into(),
                initials: "em".into(),
                code: "emu1".into(),
                name: "Emu".into(),
                latin: "Dromaius novaehollandiae".into(),
            },
        );
        mapping.insert(
            "Common Ostrich(非洲鸵鸟)",
            OutputRecord {
                pinyin: String::new(),
                initials: String::new(),
                code: "ostric2".into(),
                name: "Common Ostrich(非洲鸵鸟)".into(),
                latin: String::new(),
            },
        );
        mapping
    }

    #[test]
    fn test_non_ascii_written_literally() {
        let json = String::from_utf8(to_json_bytes(&sample(), 4).unwrap()).unwrap();
        assert!(json.contains("非洲鸵鸟"));
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn test_four_space_indent_and_field_order() {
        let json = String::from_utf8(to_json_bytes(&sample(), 4).unwrap()).unwrap();
        assert!(json.starts_with("{\n    \"Emu\": {\n        \"pinyin\": \"ermiao\",\n        \"initials\": \"em\",\n        \"code\": \"emu1\",\n        \"name\": \"Emu\",\n        \"latin\": \"Dromaius novaehollandiae\"\n    },"));
    }

    #[test]
    fn test_write_then_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pinyin_mapping.json");

        write_mapping(&sample(), &path, 4).unwrap();
        let read = read_mapping(&path).unwrap();

        assert_eq!(read, sample());
        assert_eq!(
            read.keys().collect::<Vec<_>>(),
            vec!["Emu", "Common Ostrich(非洲鸵鸟)"]
        );
        assert!(!dir.path().join(".pinyin_mapping.json.tmp").exists());
    }

    #[test]
    fn test_overwrites_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pinyin_mapping.json");
        fs::write(&path, "{\"Stale Bird\": {}}").unwrap();

        write_mapping(&OutputMapping::new(), &path, 4).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
    }

    #[test]
    fn test_missing_directory_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("pinyin_mapping.json");

        let err = write_mapping(&sample(), &path, 4).unwrap_err();
        assert!(matches!(err, EmitError::Write { .. }));
        assert!(err.to_string().contains("no_such_dir"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_failed_write_removes_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pinyin_mapping.json");
        let staging = dir.path().join(".pinyin_mapping.json.tmp");
        // Writes through this link fail with "no space left on device".
        std::os::unix::fs::symlink("/dev/full", &staging).unwrap();

        let err = write_mapping(&sample(), &path, 4).unwrap_err();
        assert!(matches!(err, EmitError::Write { .. }));
        assert!(fs::symlink_metadata(&staging).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_read_malformed_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pinyin_mapping.json");
        fs::write(&path, "{\"Emu\": {\"pinyin\": 1}}").unwrap();

        let err = read_mapping(&path).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }
}
