pub mod config;
pub mod error;
pub mod lister;
pub mod organizer;
pub mod paths;
pub mod reader;
pub mod rules;
pub mod search;
#[cfg(test)]
mod testutils;
pub mod types;

pub use config::{Config, ConflictPolicy, DEFAULT_READ_LIMIT};
pub use error::{Action, FsError, FsResult, PathKind};
pub use lister::list_files;
pub use organizer::{organize_files, Organizer};
pub use paths::resolve_path;
pub use reader::{read_file, TextReader, TRUNCATION_MARKER};
pub use rules::{extension_of, RuleError, RuleTable};
pub use search::search_files;
pub use types::{FileRecord, MovedFile, OrganizeReport, SearchRecord, TextContent};
