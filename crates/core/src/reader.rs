use std::fs;

use crate::config::{Config, DEFAULT_READ_LIMIT};
use crate::error::{Action, FsError, FsResult, PathKind};
use crate::lister::{file_name, resolve_existing};
use crate::rules::{extension_of, raw_extension, RuleTable};
use crate::types::TextContent;

pub const TRUNCATION_MARKER: &str = "... (truncated)";

/// Reads files whose extension is on the rule table's text allow-list,
/// keeping at most `limit` characters.
pub struct TextReader<'a> {
    rules: &'a RuleTable,
    limit: usize,
}

impl<'a> TextReader<'a> {
    pub fn new(rules: &'a RuleTable) -> Self {
        Self {
            rules,
            limit: DEFAULT_READ_LIMIT,
        }
    }

    pub fn from_config(config: &'a Config) -> Self {
        Self::new(&config.rules).with_limit(config.read_limit)
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn read(&self, file_path: &str) -> FsResult<TextContent> {
        let path = resolve_existing(file_path, PathKind::File, Action::Read)?;
        if !path.is_file() {
            return Err(FsError::NotAFile { path });
        }

        if !self.rules.is_text(&extension_of(&path)) {
            return Err(FsError::UnsupportedType {
                extension: raw_extension(&path),
                supported: self.rules.text_extensions.clone(),
            });
        }

        let bytes = fs::read(&path).map_err(FsError::io(Action::Read))?;
        let (content, truncated) = truncate(universal_newlines(decode(bytes)), self.limit);

        tracing::info!(file = %path.display(), truncated, "read file");
        Ok(TextContent {
            file: file_name(&path),
            content,
            truncated,
        })
    }
}

/// Read `file_path` with the default allow-list and limit.
pub fn read_file(file_path: &str) -> FsResult<TextContent> {
    TextReader::new(&RuleTable::default()).read(file_path)
}

/// UTF-8 first; anything else is taken as Latin-1, which cannot fail.
fn decode(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|err| {
        tracing::debug!("content is not utf-8, decoding as latin-1");
        err.into_bytes().into_iter().map(char::from).collect()
    })
}

/// `\r\n` and lone `\r` become `\n`, as text-mode reads do.
fn universal_newlines(content: String) -> String {
    if content.contains('\r') {
        content.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        content
    }
}

fn truncate(content: String, limit: usize) -> (String, bool) {
    match content.char_indices().nth(limit) {
        Some((cut, _)) => {
            let mut kept = content[..cut].to_string();
            kept.push_str(TRUNCATION_MARKER);
            (kept, true)
        }
        None => (content, false),
    }
}
