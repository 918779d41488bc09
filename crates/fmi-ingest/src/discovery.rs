//! Report file discovery for input folders.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{IngestError, Result};

/// Extension of Foundation Medicine report exports.
pub const REPORT_EXTENSION: &str = "xml";

/// Lists all XML report files in a directory.
///
/// Returns files sorted by filename so batch order is deterministic.
pub fn list_report_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let files = list_files_with_extension(dir, REPORT_EXTENSION)?;
    debug!(dir = %dir.display(), file_count = files.len(), "discovered report files");
    Ok(files)
}

/// Regular files in `dir` whose extension matches `extension` ignoring ASCII
/// case, sorted by filename. Subdirectories are not descended into.
pub fn list_files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let read_error = |source| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        let matches = path
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();

        for name in &["TRF0002.xml", "TRF0001.XML", "notes.txt", "summary.csv"] {
            let path = dir.path().join(name);
            std::fs::write(&path, "<x/>").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.xml")).unwrap();

        dir
    }

    #[test]
    fn test_list_report_files() {
        let dir = create_test_dir();
        let files = list_report_files(dir.path()).unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|path| path.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["TRF0001.XML", "TRF0002.xml"]);
    }

    #[test]
    fn test_list_files_with_other_extension() {
        let dir = create_test_dir();
        let files = list_files_with_extension(dir.path(), "CSV").unwrap();
        assert_eq!(files, vec![dir.path().join("summary.csv")]);
    }

    #[test]
    fn test_list_report_files_empty_dir() {
        let dir = TempDir::new().unwrap();
        let files = list_report_files(dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_list_report_files_not_a_directory() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("report.xml");
        std::fs::write(&file_path, "<x/>").unwrap();

        let result = list_report_files(&file_path);
        assert!(matches!(result, Err(IngestError::DirectoryNotFound { .. })));
    }
}
