use std::io;
use walkdir::{DirEntry, WalkDir};

use crate::error::{Action, FsError, FsResult, PathKind};
use crate::lister::{file_name, resolve_existing};
use crate::rules::extension_of;
use crate::types::SearchRecord;

/// Find files anywhere below `directory` whose name contains `query`, or
/// whose extension equals it, ignoring case.
///
/// Directory symlinks are not descended into, so link cycles cannot trap
/// the walk. Symlinks pointing at files are still matched.
pub fn search_files(directory: &str, query: &str) -> FsResult<Vec<SearchRecord>> {
    let root = resolve_existing(directory, PathKind::Directory, Action::Search)?;
    let query = query.to_lowercase();

    let mut results = Vec::new();
    for entry in WalkDir::new(&root).min_depth(1).follow_links(false) {
        let entry = entry.map_err(|e| FsError::io(Action::Search)(io::Error::from(e)))?;
        if !is_file(&entry) {
            continue;
        }

        let name = file_name(entry.path());
        let extension = extension_of(entry.path());
        if name.to_lowercase().contains(&query) || query == extension {
            results.push(SearchRecord {
                name,
                path: entry.path().to_string_lossy().into_owned(),
                extension,
            });
        }
    }

    tracing::info!(
        directory = %root.display(),
        query = %query,
        matches = results.len(),
        "searched files"
    );
    Ok(results)
}

fn is_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::{create_mixed_dir, path_str, write_file};
    use std::fs;
    use tempfile::TempDir;

    fn names(records: &[SearchRecord]) -> Vec<&str> {
        let mut names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        names.sort();
        names
    }

    #[test]
    fn extension_query_matches_at_every_depth() {
        let dir = create_mixed_dir();

        let results = search_files(path_str(dir.path()), ".png").unwrap();

        assert_eq!(names(&results), vec!["beach.png", "sunset.PNG"]);
        assert!(results.iter().all(|r| r.extension == ".png"));
    }

    #[test]
    fn extension_match_does_not_need_substring() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "IMG_0001.JPG", "x");

        let by_ext = search_files(path_str(dir.path()), ".jpg").unwrap();
        assert_eq!(names(&by_ext), vec!["IMG_0001.JPG"]);
    }

    #[test]
    fn substring_query_ignores_case() {
        let dir = create_mixed_dir();

        let results = search_files(path_str(dir.path()), "SUN").unwrap();

        assert_eq!(names(&results), vec!["sunset.PNG"]);
    }

    #[test]
    fn bare_extension_matches_only_as_substring() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "report.pdf", "x");
        write_file(dir.path(), "pdf-guide.txt", "x");

        let results = search_files(path_str(dir.path()), "pdf").unwrap();
        assert_eq!(names(&results), vec!["pdf-guide.txt", "report.pdf"]);

        let results = search_files(path_str(dir.path()), "txt.").unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn records_have_absolute_paths() {
        let dir = create_mixed_dir();

        let results = search_files(path_str(dir.path()), "beach").unwrap();

        assert_eq!(results.len(), 1);
        let path = std::path::Path::new(&results[0].path);
        assert!(path.is_absolute());
        assert!(path.ends_with("photos/2024/beach.png"));
    }

    #[test]
    fn directories_never_match() {
        let dir = create_mixed_dir();
        let results = search_files(path_str(dir.path()), "photos").unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn missing_directory_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = search_files(path_str(&dir.path().join("nope")), "x").unwrap_err();
        assert!(matches!(err, FsError::NotFound { .. }));
        assert!(err.to_string().contains("nope"));
    }

    #[cfg(unix)]
    #[test]
    fn survives_symlink_cycles() {
        let dir = TempDir::new().unwrap();
        let inner = dir.path().join("inner");
        fs::create_dir(&inner).unwrap();
        write_file(&inner, "loop.txt", "x");
        std::os::unix::fs::symlink(dir.path(), inner.join("back")).unwrap();

        let results = search_files(path_str(dir.path()), "loop").unwrap();

        assert_eq!(results.len(), 1);
    }
}
