use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Snapshot of a regular file taken while listing a directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub name: String,
    pub extension: String,
    pub size: u64,
    /// Seconds since the Unix epoch.
    pub modified: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub name: String,
    pub path: String,
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedFile {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Outcome of one organize run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizeReport {
    pub moved: Vec<MovedFile>,
    /// Files left in place because their destination was taken.
    pub skipped: Vec<PathBuf>,
}

impl OrganizeReport {
    pub fn moved_count(&self) -> usize {
        self.moved.len()
    }

    pub fn message(&self) -> String {
        format!("Moved {} files", self.moved.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextContent {
    pub file: String,
    pub content: String,
    pub truncated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_message_counts_moves() {
        let report = OrganizeReport {
            moved: vec![MovedFile {
                from: PathBuf::from("/d/a.pdf"),
                to: PathBuf::from("/d/Documents/a.pdf"),
            }],
            skipped: vec![PathBuf::from("/d/b.pdf")],
        };
        assert_eq!(report.message(), "Moved 1 files");
        assert_eq!(OrganizeReport::default().message(), "Moved 0 files");
    }

    #[test]
    fn file_record_serializes_numbers() {
        let record = FileRecord {
            name: "a.txt".to_string(),
            extension: ".txt".to_string(),
            size: 12,
            modified: 1700000000.5,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["size"], 12);
        assert_eq!(json["modified"], 1700000000.5);
    }
}
