//! Documents handed to the runner.

use std::path::PathBuf;

use tower_lsp::lsp_types::Url;

/// A text document to lint.
#[derive(Debug, Clone)]
pub struct Document {
    /// The document's URI.
    pub uri: Url,
    /// Full text content.
    pub text: String,
    /// Editor-side version, when known.
    pub version: Option<i32>,
}

impl Document {
    pub fn new(uri: Url, text: impl Into<String>) -> Self {
        Self {
            uri,
            text: text.into(),
            version: None,
        }
    }

    /// Returns the document's filesystem path, when it has one.
    ///
    /// Stylelint compares paths case-sensitively even on Windows, so a
    /// lowercase drive-letter prefix is uppercased before use; syntax and
    /// rule detection otherwise diverge between open editors and the CLI.
    pub fn fs_path(&self) -> Option<PathBuf> {
        let path = self.uri.to_file_path().ok()?;

        if cfg!(windows) {
            let raw = path.to_string_lossy();
            return Some(PathBuf::from(uppercase_drive_letter(&raw)));
        }

        Some(path)
    }

    /// The directory resolution starts from when no workspace folder is
    /// known: the document's own directory, else the process working
    /// directory.
    pub fn base_directory(&self) -> PathBuf {
        if let Some(path) = self.fs_path() {
            if let Some(parent) = path.parent() {
                return parent.to_path_buf();
            }
        }

        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }
}

/// Uppercases a lowercase `c:`-style drive prefix.
pub(crate) fn uppercase_drive_letter(path: &str) -> String {
    let bytes = path.as_bytes();

    if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_lowercase() {
        let mut fixed = String::with_capacity(path.len());
        fixed.push(bytes[0].to_ascii_uppercase() as char);
        fixed.push_str(&path[1..]);
        return fixed;
    }

    path.to_string()
}
