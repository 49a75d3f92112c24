use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Placeholder stored as content for files outside the text allow-list.
pub const BINARY_PLACEHOLDER: &str = "Binary file (content not readable)";
/// Content stored when an allow-listed file could not be read.
pub const READ_ERROR_PLACEHOLDER: &str = "Error reading file";
/// Extensions (lowercase) whose content is sampled.
pub const TEXT_EXTENSIONS: [&str; 6] = ["txt", "csv", "json", "php", "html", "log"];

/// Metadata and a content sample for one scanned file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// File name without directories.
    pub name: String,
    /// Absolute path to the file.
    pub path: PathBuf,
    pub size_bytes: u64,
    /// `size_bytes / 1_048_576`.
    pub size_mb: f64,
    /// Lowercase extension, empty when the file has none.
    pub extension: String,
    /// The first bytes of the file for text-like extensions, otherwise a placeholder.
    ///
    /// See [`BINARY_PLACEHOLDER`] and [`READ_ERROR_PLACEHOLDER`].
    pub content: String,
}

/// Aggregate describing one scanned directory.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FolderRecord {
    pub folder_name: String,
    /// Number of records in `files`.
    pub total_files: u64,
    pub files: Vec<FileRecord>,
}

impl FolderRecord {
    pub fn new(folder_name: impl Into<String>) -> Self {
        Self {
            folder_name: folder_name.into(),
            total_files: 0,
            files: Vec::new(),
        }
    }

    /// Appends a record and keeps `total_files` in step with it.
    pub fn push(&mut self, file: FileRecord) {
        self.files.push(file);
        self.total_files += 1;
    }
}

/// Outcome of describing a single file.
#[derive(Debug, Clone, PartialEq)]
pub enum Described {
    Record(FileRecord),
    /// The file exceeded the size ceiling and produced no record.
    Skipped { path: PathBuf, size_mb: f64 },
}

pub(crate) fn is_text_extension(extension: &str) -> bool {
    TEXT_EXTENSIONS.contains(&extension)
}
