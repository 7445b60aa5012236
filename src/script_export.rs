//! Companion import-helper script.
//!
//! The editor-side ExtendScript ships embedded in the binary and is written
//! out verbatim to a user-chosen path; fontpeek never rewrites or templates
//! it.

use std::fs;
use std::path::Path;

/// The embedded import helper.
pub const IMPORT_SCRIPT: &str = include_str!("../assets/scripts/import-svg.jsx");

/// Default file name offered in the save dialog.
pub const SCRIPT_FILE_NAME: &str = "fontpeek-import.jsx";

/// Write the helper script, unmodified, to `path`.
pub fn write_script(path: &Path) -> Result<(), std::io::Error> {
    fs::write(path, IMPORT_SCRIPT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_is_embedded() {
        assert!(IMPORT_SCRIPT.contains("#target photoshop"));
        assert!(IMPORT_SCRIPT.contains("markHoles"));
        // The documented heuristic limitation stays documented.
        assert!(IMPORT_SCRIPT.contains("bounding box"));
    }

    #[test]
    fn test_write_script_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SCRIPT_FILE_NAME);
        write_script(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), IMPORT_SCRIPT);
    }
}
