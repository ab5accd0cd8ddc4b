//! Document-level types.

use serde::{Deserialize, Serialize};

/// Extracted content of a single PDF document: per-document metadata plus
/// the ordered stream of text lines across all pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentContent {
    /// Document metadata (filename, title, page count, etc.)
    pub info: DocumentInfo,

    /// Text lines in reading order
    pub lines: Vec<ContentLine>,
}

impl DocumentContent {
    /// Create an empty document with the given metadata.
    pub fn new(info: DocumentInfo) -> Self {
        Self {
            info,
            lines: Vec::new(),
        }
    }

    /// Add a line to the document.
    pub fn add_line(&mut self, line: ContentLine) {
        self.lines.push(line);
    }

    /// Check if the document has any extracted text.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Title to report for this document: the metadata title if present,
    /// otherwise the filename without its extension.
    pub fn display_title(&self) -> String {
        if let Some(ref title) = self.info.title {
            if !title.trim().is_empty() {
                return title.clone();
            }
        }
        self.info.filename_stem()
    }
}

/// Metadata for a single input document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// File name (without directory components)
    pub filename: String,

    /// Title from the PDF Info dictionary, if any
    pub title: Option<String>,

    /// Total number of pages
    pub page_count: u32,

    /// PDF version (e.g., "1.7")
    pub pdf_version: String,

    /// Whether the document is encrypted
    pub encrypted: bool,
}

impl DocumentInfo {
    /// Create metadata for a file with the given PDF version.
    pub fn new(filename: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            pdf_version: version.into(),
            ..Default::default()
        }
    }

    /// Filename without the `.pdf` extension.
    pub fn filename_stem(&self) -> String {
        self.filename
            .strip_suffix(".pdf")
            .or_else(|| self.filename.strip_suffix(".PDF"))
            .unwrap_or(&self.filename)
            .to_string()
    }
}

/// A single line of text with page and style information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentLine {
    /// The text content
    pub text: String,

    /// Page number (1-indexed)
    pub page: u32,

    /// Dominant font size of the line in points
    pub font_size: f32,

    /// Whether the line is predominantly bold
    pub bold: bool,
}

impl ContentLine {
    /// Create a new content line.
    pub fn new(text: impl Into<String>, page: u32) -> Self {
        Self {
            text: text.into(),
            page,
            font_size: 12.0,
            bold: false,
        }
    }

    /// Set the font size.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Mark the line as bold.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Check if the line has no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_content_new() {
        let doc = DocumentContent::new(DocumentInfo::new("paper.pdf", "1.7"));
        assert!(doc.is_empty());
        assert_eq!(doc.info.filename, "paper.pdf");
    }

    #[test]
    fn test_filename_stem() {
        let info = DocumentInfo::new("report.pdf", "1.4");
        assert_eq!(info.filename_stem(), "report");

        let info = DocumentInfo::new("REPORT.PDF", "1.4");
        assert_eq!(info.filename_stem(), "REPORT");

        let info = DocumentInfo::new("notes", "1.4");
        assert_eq!(info.filename_stem(), "notes");
    }

    #[test]
    fn test_display_title_fallback() {
        let mut doc = DocumentContent::new(DocumentInfo::new("paper.pdf", "1.7"));
        assert_eq!(doc.display_title(), "paper");

        doc.info.title = Some("A Study of Things".to_string());
        assert_eq!(doc.display_title(), "A Study of Things");

        doc.info.title = Some("   ".to_string());
        assert_eq!(doc.display_title(), "paper");
    }

    #[test]
    fn test_plain_text() {
        let mut doc = DocumentContent::new(DocumentInfo::new("a.pdf", "1.7"));
        doc.add_line(ContentLine::new("Hello", 1));
        doc.add_line(ContentLine::new("world", 1));
        assert_eq!(doc.plain_text(), "Hello world");
    }
}
