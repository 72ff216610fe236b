use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{Config, ConflictPolicy};
use crate::error::{Action, FsError, FsResult, PathKind};
use crate::lister::{direct_files, resolve_existing};
use crate::rules::{extension_of, RuleTable};
use crate::types::{MovedFile, OrganizeReport};

/// Moves files into folders named by the rule table, one level below the
/// directory being organized. Subdirectories are never touched, so running
/// it twice in a row moves nothing the second time.
pub struct Organizer<'a> {
    rules: &'a RuleTable,
    on_conflict: ConflictPolicy,
}

/// Pure planning output: which file goes into which folder
#[derive(Debug, Clone, PartialEq, Eq)]
struct PlannedMove {
    source: PathBuf,
    name: OsString,
    target_dir: PathBuf,
}

enum MoveOutcome {
    Moved(PathBuf),
    Skipped,
}

impl<'a> Organizer<'a> {
    pub fn new(rules: &'a RuleTable) -> Self {
        Self {
            rules,
            on_conflict: ConflictPolicy::default(),
        }
    }

    pub fn from_config(config: &'a Config) -> Self {
        Self::new(&config.rules).with_conflict_policy(config.on_conflict)
    }

    pub fn with_conflict_policy(mut self, on_conflict: ConflictPolicy) -> Self {
        self.on_conflict = on_conflict;
        self
    }

    /// Organize the direct children of `directory`.
    ///
    /// A failure stops the run. Files moved before it stay moved.
    pub fn organize(&self, directory: &str) -> FsResult<OrganizeReport> {
        let dir = resolve_existing(directory, PathKind::Directory, Action::Organize)?;
        let plan = self.plan(&dir).map_err(FsError::io(Action::Organize))?;

        let mut report = OrganizeReport::default();
        for planned in plan {
            match execute_move(&planned, self.on_conflict) {
                Ok(MoveOutcome::Moved(to)) => {
                    tracing::debug!(from = %planned.source.display(), to = %to.display(), "moved file");
                    report.moved.push(MovedFile {
                        from: planned.source,
                        to,
                    });
                }
                Ok(MoveOutcome::Skipped) => {
                    tracing::debug!(file = %planned.source.display(), "destination taken, skipped");
                    report.skipped.push(planned.source);
                }
                Err(source) => {
                    let moved = report.moved_count();
                    tracing::warn!(directory = %dir.display(), moved, error = %source, "organize aborted");
                    return Err(match moved {
                        0 => FsError::Io {
                            action: Action::Organize,
                            source,
                        },
                        moved => FsError::Interrupted { moved, source },
                    });
                }
            }
        }

        tracing::info!(
            directory = %dir.display(),
            moved = report.moved_count(),
            skipped = report.skipped.len(),
            "organized files"
        );
        Ok(report)
    }

    fn plan(&self, dir: &Path) -> io::Result<Vec<PlannedMove>> {
        Ok(direct_files(dir)?
            .into_iter()
            .filter_map(|(source, _)| {
                let folder = self.rules.folder_for(&extension_of(&source))?;
                let name = source.file_name()?.to_os_string();
                Some(PlannedMove {
                    target_dir: dir.join(folder),
                    name,
                    source,
                })
            })
            .collect())
    }
}

/// Organize `directory` with the default rule table and conflict policy.
pub fn organize_files(directory: &str) -> FsResult<OrganizeReport> {
    Organizer::new(&RuleTable::default()).organize(directory)
}

fn execute_move(planned: &PlannedMove, on_conflict: ConflictPolicy) -> io::Result<MoveOutcome> {
    fs::create_dir_all(&planned.target_dir)?;

    let target = planned.target_dir.join(&planned.name);
    let target = match (occupied(&target), on_conflict) {
        (false, _) | (true, ConflictPolicy::Overwrite) => target,
        (true, ConflictPolicy::Skip) => return Ok(MoveOutcome::Skipped),
        (true, ConflictPolicy::Rename) => free_name(&planned.target_dir, &planned.name),
    };

    fs::rename(&planned.source, &target)?;
    Ok(MoveOutcome::Moved(target))
}

fn occupied(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// First `stem (n).ext` in `dir` that does not exist yet.
fn free_name(dir: &Path, name: &OsString) -> PathBuf {
    let original = Path::new(name);
    let stem = original.file_stem().unwrap_or(name.as_os_str());

    (1..)
        .map(|n| {
            let mut candidate = stem.to_os_string();
            candidate.push(format!(" ({n})"));
            if let Some(ext) = original.extension() {
                candidate.push(".");
                candidate.push(ext);
            }
            dir.join(candidate)
        })
        .find(|candidate| !occupied(candidate))
        .unwrap_or_else(|| dir.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::{create_mixed_dir, path_str, write_file};
    use tempfile::TempDir;

    #[test]
    fn moves_ruled_files_into_folders() {
        let dir = create_mixed_dir();
        let rules = RuleTable::default();

        let report = Organizer::new(&rules)
            .organize(path_str(dir.path()))
            .unwrap();

        assert_eq!(report.message(), "Moved 2 files");
        assert!(dir.path().join("Documents/a.pdf").exists());
        assert!(dir.path().join("Images/b.jpg").exists());
        assert!(!dir.path().join("a.pdf").exists());
        assert!(!dir.path().join("b.jpg").exists());
        assert!(dir.path().join("c.xyz").exists());
        assert!(dir.path().join("Notes.MD").exists());
    }

    #[test]
    fn leaves_subdirectories_alone() {
        let dir = create_mixed_dir();

        organize_files(path_str(dir.path())).unwrap();

        assert!(dir.path().join("photos/sunset.PNG").exists());
        assert!(dir.path().join("photos/2024/beach.png").exists());
    }

    #[test]
    fn second_run_moves_nothing() {
        let dir = create_mixed_dir();

        let first = organize_files(path_str(dir.path())).unwrap();
        let second = organize_files(path_str(dir.path())).unwrap();

        assert_eq!(first.moved_count(), 2);
        assert_eq!(second.moved_count(), 0);
        assert_eq!(second.message(), "Moved 0 files");
    }

    #[test]
    fn extension_match_ignores_case() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "SCAN.PDF", "x");

        let report = organize_files(path_str(dir.path())).unwrap();

        assert_eq!(report.moved_count(), 1);
        assert!(dir.path().join("Documents/SCAN.PDF").exists());
    }

    #[test]
    fn existing_folder_is_reused() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("Music")).unwrap();
        write_file(dir.path().join("Music"), "old.mp3", "old");
        write_file(dir.path(), "new.mp3", "new");

        organize_files(path_str(dir.path())).unwrap();

        assert!(dir.path().join("Music/old.mp3").exists());
        assert!(dir.path().join("Music/new.mp3").exists());
    }

    #[test]
    fn skip_policy_keeps_both_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("Documents")).unwrap();
        write_file(dir.path().join("Documents"), "a.pdf", "existing");
        write_file(dir.path(), "a.pdf", "incoming");

        let report = organize_files(path_str(dir.path())).unwrap();

        assert_eq!(report.moved_count(), 0);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].ends_with("a.pdf"));
        assert_eq!(
            fs::read_to_string(dir.path().join("Documents/a.pdf")).unwrap(),
            "existing"
        );
        assert!(dir.path().join("a.pdf").exists());
    }

    #[test]
    fn rename_policy_picks_free_name() {
        let dir = TempDir::new().unwrap();
        let docs = dir.path().join("Documents");
        fs::create_dir(&docs).unwrap();
        write_file(&docs, "a.pdf", "first");
        write_file(&docs, "a (1).pdf", "second");
        write_file(dir.path(), "a.pdf", "third");

        let rules = RuleTable::default();
        let report = Organizer::new(&rules)
            .with_conflict_policy(ConflictPolicy::Rename)
            .organize(path_str(dir.path()))
            .unwrap();

        assert_eq!(report.moved_count(), 1);
        assert!(report.moved[0].to.ends_with("a (2).pdf"));
        assert_eq!(fs::read_to_string(docs.join("a (2).pdf")).unwrap(), "third");
        assert_eq!(fs::read_to_string(docs.join("a.pdf")).unwrap(), "first");
    }

    #[test]
    fn overwrite_policy_replaces_destination() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("Videos")).unwrap();
        write_file(dir.path().join("Videos"), "clip.mp4", "old");
        write_file(dir.path(), "clip.mp4", "new");

        let rules = RuleTable::default();
        let report = Organizer::new(&rules)
            .with_conflict_policy(ConflictPolicy::Overwrite)
            .organize(path_str(dir.path()))
            .unwrap();

        assert_eq!(report.moved_count(), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("Videos/clip.mp4")).unwrap(),
            "new"
        );
    }

    #[test]
    fn custom_rules_drive_the_folders() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "backup.zip", "x");
        write_file(dir.path(), "paper.pdf", "x");

        let rules = RuleTable::new([(".zip", "Archives")], &[]).unwrap();
        let report = Organizer::new(&rules)
            .organize(path_str(dir.path()))
            .unwrap();

        assert_eq!(report.moved_count(), 1);
        assert!(dir.path().join("Archives/backup.zip").exists());
        assert!(dir.path().join("paper.pdf").exists());
    }

    #[test]
    fn folder_name_taken_by_file_fails() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "Documents", "not a folder");
        write_file(dir.path(), "a.pdf", "x");

        let err = organize_files(path_str(dir.path())).unwrap_err();

        assert!(matches!(err, FsError::Io { action: Action::Organize, .. }));
        assert!(err.to_string().starts_with("Failed to organize files:"));
    }

    #[test]
    fn missing_directory_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = organize_files(path_str(&dir.path().join("absent"))).unwrap_err();
        assert!(matches!(err, FsError::NotFound { .. }));
        assert!(err.to_string().contains("absent"));
    }

    #[cfg(unix)]
    #[test]
    fn looping_symlink_does_not_stop_organize() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.pdf", "x");
        std::os::unix::fs::symlink(dir.path().join("loop.pdf"), dir.path().join("loop.pdf"))
            .unwrap();

        let report = organize_files(path_str(dir.path())).unwrap();

        assert_eq!(report.message(), "Moved 1 files");
        assert!(dir.path().join("Documents/a.pdf").exists());
        assert!(dir.path().join("loop.pdf").symlink_metadata().is_ok());
    }

    #[test]
    fn free_name_without_extension() {
        let dir = TempDir::new().unwrap();
        let name = OsString::from("notes");
        write_file(dir.path(), "notes", "x");

        assert_eq!(free_name(dir.path(), &name), dir.path().join("notes (1)"));
    }

    #[cfg(unix)]
    #[test]
    fn free_name_keeps_non_utf8_bytes() {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        let dir = TempDir::new().unwrap();
        let name = OsString::from_vec(b"caf\xe9.pdf".to_vec());

        let candidate = free_name(dir.path(), &name);

        assert_eq!(
            candidate.file_name().unwrap().as_bytes(),
            b"caf\xe9 (1).pdf"
        );
    }
}
