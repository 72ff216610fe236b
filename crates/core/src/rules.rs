use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, Path};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("extension {0:?} must start with a dot")]
    MissingDot(String),
    #[error("extension {0:?} must be lowercase")]
    NotLowercase(String),
    #[error("folder {folder:?} for {extension} must be a plain folder name")]
    InvalidFolder { extension: String, folder: String },
    #[error("text extension {0} listed more than once")]
    DuplicateTextExtension(String),
}

/// Extension-to-folder mapping used by the organizer plus the extensions
/// the text reader accepts. Keys always carry a leading dot and are lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    pub organize: BTreeMap<String, String>,
    pub text_extensions: Vec<String>,
}

impl Default for RuleTable {
    fn default() -> Self {
        let organize = [
            (".pdf", "Documents"),
            (".docx", "Documents"),
            (".jpg", "Images"),
            (".png", "Images"),
            (".mp3", "Music"),
            (".mp4", "Videos"),
        ]
        .into_iter()
        .map(|(ext, folder)| (ext.to_string(), folder.to_string()))
        .collect();

        let text_extensions = [".txt", ".md", ".py", ".json", ".csv"]
            .into_iter()
            .map(String::from)
            .collect();

        Self {
            organize,
            text_extensions,
        }
    }
}

impl RuleTable {
    /// Build a table from arbitrary-case entries, lowercasing keys first.
    pub fn new<I, S, F>(organize: I, text_extensions: &[&str]) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = (S, F)>,
        S: AsRef<str>,
        F: Into<String>,
    {
        let table = Self {
            organize: organize
                .into_iter()
                .map(|(ext, folder)| (ext.as_ref().to_lowercase(), folder.into()))
                .collect(),
            text_extensions: text_extensions.iter().map(|e| e.to_lowercase()).collect(),
        };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), RuleError> {
        for (ext, folder) in &self.organize {
            check_extension(ext)?;
            if !is_plain_folder_name(folder) {
                return Err(RuleError::InvalidFolder {
                    extension: ext.clone(),
                    folder: folder.clone(),
                });
            }
        }

        for (i, ext) in self.text_extensions.iter().enumerate() {
            check_extension(ext)?;
            if self.text_extensions[..i].contains(ext) {
                return Err(RuleError::DuplicateTextExtension(ext.clone()));
            }
        }

        Ok(())
    }

    /// Destination folder for an extension, if any rule covers it.
    pub fn folder_for(&self, extension: &str) -> Option<&str> {
        self.organize
            .get(&extension.to_lowercase())
            .map(String::as_str)
    }

    pub fn is_text(&self, extension: &str) -> bool {
        let ext = extension.to_lowercase();
        self.text_extensions.iter().any(|e| *e == ext)
    }
}

fn check_extension(ext: &str) -> Result<(), RuleError> {
    if !ext.starts_with('.') {
        return Err(RuleError::MissingDot(ext.to_string()));
    }
    if ext.to_lowercase() != ext {
        return Err(RuleError::NotLowercase(ext.to_string()));
    }
    Ok(())
}

fn is_plain_folder_name(folder: &str) -> bool {
    let mut components = Path::new(folder).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !folder.contains(['/', '\\'])
}

/// Lowercased extension of a path including the leading dot, or empty.
///
/// Dotfiles such as `.bashrc` and names ending in a bare dot have no extension.
pub fn extension_of(path: &Path) -> String {
    raw_extension(path).to_lowercase()
}

/// Extension as written on disk, including the leading dot, or empty.
pub fn raw_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{e}"))
        .unwrap_or_default()
}
