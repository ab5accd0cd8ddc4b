//! Section segmentation.
//!
//! Splits a document's line stream into titled sections by classifying
//! heading lines. Classification combines textual patterns (numbered
//! headings, canonical section names, all-caps lines) with a style rule:
//! bold text set larger than the document's body size.

use regex::Regex;

use crate::model::{ContentLine, DocumentContent, Section};
use crate::parser::FontStatistics;

/// Minimum trimmed length for a heading candidate.
const MIN_HEADING_LEN: usize = 3;
/// Maximum trimmed length for a heading candidate.
const MAX_HEADING_LEN: usize = 150;

/// Heading classifier for a single document.
///
/// Holds the compiled heading patterns and the document's font size
/// statistics. Build one per document with [`HeadingClassifier::from_lines`].
pub struct HeadingClassifier {
    numbered: Regex,
    all_caps: Regex,
    canonical: Regex,
    chapter: Regex,
    font_stats: FontStatistics,
}

impl HeadingClassifier {
    /// Build a classifier from the document's lines, deriving the body
    /// font size from their size histogram.
    pub fn from_lines(lines: &[ContentLine]) -> Self {
        let mut font_stats = FontStatistics::default();
        for line in lines {
            font_stats.add_size(line.font_size);
        }
        font_stats.analyze();

        Self {
            numbered: Regex::new(r"^\d+\.\s+").unwrap(),
            all_caps: Regex::new(r"^[A-Z][A-Z\s]+$").unwrap(),
            canonical: Regex::new(
                r"(?i)^(Abstract|Introduction|Conclusion|References|Methods?|Results|Discussion)$",
            )
            .unwrap(),
            chapter: Regex::new(r"(?i)^(Chapter|Section)\s+\d+").unwrap(),
            font_stats,
        }
    }

    /// Check whether a line should open a new section.
    pub fn is_heading(&self, line: &ContentLine) -> bool {
        let text = line.text.trim();
        let len = text.chars().count();
        if !(MIN_HEADING_LEN..=MAX_HEADING_LEN).contains(&len) {
            return false;
        }

        if self.numbered.is_match(text)
            || self.all_caps.is_match(text)
            || self.canonical.is_match(text)
            || self.chapter.is_match(text)
        {
            return true;
        }

        // Style rule: bold and larger than the document body text
        line.bold && self.font_stats.is_larger_than_body(line.font_size)
    }

    /// Body font size the classifier derived.
    pub fn body_size(&self) -> f32 {
        self.font_stats.body_size()
    }
}

/// Segment a document's line stream into titled sections.
///
/// A heading line opens a new section; subsequent lines attach to it until
/// the next heading. A document with no detected headings at all becomes a
/// single section titled after the filename stem, so it still participates
/// in ranking.
pub fn segment_document(content: &DocumentContent) -> Vec<Section> {
    let classifier = HeadingClassifier::from_lines(&content.lines);
    let document = content.info.filename.clone();

    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<Section> = None;

    for line in &content.lines {
        if line.is_blank() {
            continue;
        }

        if classifier.is_heading(line) {
            if let Some(section) = current.take() {
                sections.push(section);
            }
            current = Some(Section::new(
                document.clone(),
                line.text.trim().to_string(),
                line.page,
            ));
        } else if let Some(ref mut section) = current {
            section.add_line(line.clone());
        }
    }

    if let Some(section) = current.take() {
        sections.push(section);
    }

    if sections.is_empty() && !content.lines.is_empty() {
        let first_page = content.lines.first().map(|l| l.page).unwrap_or(1);
        let mut section = Section::new(document, content.info.filename_stem(), first_page);
        for line in &content.lines {
            if !line.is_blank() {
                section.add_line(line.clone());
            }
        }
        sections.push(section);
    }

    sections
}
