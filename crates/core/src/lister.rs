use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Action, FsError, FsResult, PathKind};
use crate::paths::resolve_path;
use crate::rules::extension_of;
use crate::types::FileRecord;

/// List the regular files directly inside `directory`.
///
/// Symlinks count as files when they point at one. Order follows the
/// filesystem and is not sorted.
pub fn list_files(directory: &str) -> FsResult<Vec<FileRecord>> {
    let dir = resolve_existing(directory, PathKind::Directory, Action::List)?;

    let files = direct_files(&dir)
        .and_then(|files| {
            files
                .iter()
                .map(|(path, meta)| file_record(path, meta))
                .collect::<io::Result<Vec<_>>>()
        })
        .map_err(FsError::io(Action::List))?;

    tracing::info!(directory = %dir.display(), count = files.len(), "listed files");
    Ok(files)
}

/// Resolve a user path and fail with `NotFound` when nothing is there.
pub(crate) fn resolve_existing(input: &str, kind: PathKind, action: Action) -> FsResult<PathBuf> {
    let path = resolve_path(input).map_err(FsError::io(action))?;
    if !path.exists() {
        return Err(FsError::NotFound { kind, path });
    }
    Ok(path)
}

/// Direct children of `dir` that are regular files, with their metadata.
pub(crate) fn direct_files(dir: &Path) -> io::Result<Vec<(PathBuf, Metadata)>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => files.push((path, meta)),
            // dangling or looping symlinks are not regular files
            Ok(_) | Err(_) => {}
        }
    }
    Ok(files)
}

fn file_record(path: &Path, meta: &Metadata) -> io::Result<FileRecord> {
    Ok(FileRecord {
        name: file_name(path),
        extension: extension_of(path),
        size: meta.len(),
        modified: epoch_seconds(meta.modified()?),
    })
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn epoch_seconds(time: SystemTime) -> f64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs_f64(),
        Err(e) => -e.duration().as_secs_f64(),
    }
}
