//! Section types produced by segmentation.

use super::ContentLine;
use serde::{Deserialize, Serialize};

/// A titled section of a document: a heading line plus the body lines that
/// follow it until the next heading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// File name of the document this section came from
    pub document: String,

    /// Section title (the heading text)
    pub title: String,

    /// Page number where the heading appears (1-indexed)
    pub page: u32,

    /// Body lines of the section
    pub lines: Vec<ContentLine>,
}

impl Section {
    /// Create a new section with an empty body.
    pub fn new(document: impl Into<String>, title: impl Into<String>, page: u32) -> Self {
        Self {
            document: document.into(),
            title: title.into(),
            page,
            lines: Vec::new(),
        }
    }

    /// Append a body line.
    pub fn add_line(&mut self, line: ContentLine) {
        self.lines.push(line);
    }

    /// Body text with lines joined by single spaces.
    pub fn body_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Title and body combined, for scoring.
    pub fn full_text(&self) -> String {
        let body = self.body_text();
        if body.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.title, body)
        }
    }

    /// Check if the section has no body content.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_text() {
        let mut section = Section::new("paper.pdf", "Introduction", 1);
        section.add_line(ContentLine::new("First line.", 1));
        section.add_line(ContentLine::new("Second line.", 2));

        assert_eq!(section.body_text(), "First line. Second line.");
        assert_eq!(
            section.full_text(),
            "Introduction First line. Second line."
        );
    }

    #[test]
    fn test_empty_section_full_text() {
        let section = Section::new("paper.pdf", "References", 9);
        assert!(section.is_empty());
        assert_eq!(section.full_text(), "References");
    }
}
