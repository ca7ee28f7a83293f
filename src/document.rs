//! Document representation for comparison inputs.
//!
//! A [`Document`] is an immutable text payload plus derived statistics and a
//! source-format tag. The tag is only used to decide whether structural
//! normalization (blank-line stripping) is needed when comparing documents
//! extracted from heterogeneous sources; the analysis core never interprets
//! it beyond that.

use crate::error::LoadError;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Declared source format of a document.
///
/// Extraction from binary formats happens outside this crate; the tag
/// records where the text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    Pdf,
    Docx,
    Spreadsheet,
    Csv,
    Txt,
    TextSegment,
}

impl SourceFormat {
    /// Derives a format tag from a file extension. Unknown extensions are
    /// treated as plain text.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => SourceFormat::Pdf,
            "docx" | "doc" => SourceFormat::Docx,
            "xlsx" | "xls" => SourceFormat::Spreadsheet,
            "csv" => SourceFormat::Csv,
            _ => SourceFormat::Txt,
        }
    }

    /// Whether text from this source arrives with blank lines already
    /// collapsed, so the opposite side of a comparison must be normalized
    /// to keep word extraction fair.
    pub fn requires_normalization(&self) -> bool {
        matches!(self, SourceFormat::Pdf)
    }
}

/// An immutable text document registered for analysis.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// File path or text-segment identifier
    pub name: String,
    /// Declared source format
    pub format: SourceFormat,
    /// Extracted text content
    pub content: String,
    /// Number of whitespace-separated words
    pub word_count: usize,
    /// Number of lines
    pub line_count: usize,
    /// Content size in bytes
    pub size_bytes: usize,
}

impl Document {
    /// Creates a document from text content and an explicit format tag.
    pub fn new(name: impl Into<String>, content: impl Into<String>, format: SourceFormat) -> Self {
        let content = content.into();
        Self {
            name: name.into(),
            format,
            word_count: content.split_whitespace().count(),
            line_count: content.split('\n').count(),
            size_bytes: content.len(),
            content,
        }
    }

    /// Creates a document from an in-memory text segment.
    pub fn from_text(content: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(name, content, SourceFormat::TextSegment)
    }

    /// Reads a UTF-8 text file into a document, deriving the format tag
    /// from the file extension.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::FileNotFound`] if the path does not exist, or
    /// [`LoadError::ReadError`] if the file cannot be read as text.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::file_not_found(path.to_string_lossy()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| LoadError::read_error(path.to_string_lossy(), e))?;

        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(SourceFormat::from_extension)
            .unwrap_or(SourceFormat::Txt);

        Ok(Self::new(path.to_string_lossy(), content, format))
    }

    /// Whether this document's side of a comparison already has blank
    /// lines collapsed by extraction.
    pub fn requires_normalization(&self) -> bool {
        self.format.requires_normalization()
    }
}
