//! Subsection refinement.
//!
//! Breaks a section's body into sentence-built passages and keeps the ones
//! that score above a relevance cutoff. Passages grow sentence by sentence
//! until they pass a size threshold, so the refined text reads as a
//! coherent excerpt rather than a single clipped sentence.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::Section;
use crate::profile::Profile;

use super::section::score_text;

/// Sentence boundary pattern, compiled once.
fn sentence_split() -> &'static Regex {
    static SENTENCE_SPLIT: OnceLock<Regex> = OnceLock::new();
    SENTENCE_SPLIT.get_or_init(|| Regex::new(r"[.!?]+").unwrap())
}

/// Options controlling passage refinement.
#[derive(Debug, Clone)]
pub struct RefineOptions {
    /// Sentences shorter than this (in chars) are discarded as noise
    pub min_sentence_len: usize,
    /// A passage is scored once it grows past this many chars
    pub target_passage_len: usize,
    /// Passages scoring at or below this are dropped
    pub min_score: f64,
    /// Maximum passages kept per section
    pub max_per_section: usize,
}

impl Default for RefineOptions {
    fn default() -> Self {
        Self {
            min_sentence_len: 20,
            target_passage_len: 300,
            min_score: 0.3,
            max_per_section: 5,
        }
    }
}

/// A refined passage extracted from a section.
#[derive(Debug, Clone)]
pub struct RefinedPassage {
    /// File name of the source document
    pub document: String,
    /// Page the passage was completed on (1-indexed)
    pub page: u32,
    /// The refined text
    pub text: String,
    /// Relevance score against the profile
    pub score: f64,
}

/// Extract the most relevant passages from a section.
///
/// Sentences above the length floor accumulate into a passage; once the
/// passage passes the target length it is scored and kept if it clears the
/// cutoff. A trailing partial passage is scored the same way against the
/// section's own page. Results are sorted by score descending and capped.
pub fn refine_section(
    section: &Section,
    profile: &Profile,
    options: &RefineOptions,
) -> Vec<RefinedPassage> {
    if section.is_empty() {
        return Vec::new();
    }

    let sentence_split = sentence_split();
    let mut passages = Vec::new();
    let mut current = String::new();

    for line in &section.lines {
        for sentence in sentence_split.split(&line.text) {
            let sentence = sentence.trim();
            if sentence.chars().count() <= options.min_sentence_len {
                continue;
            }

            current.push_str(sentence);
            current.push_str(". ");

            if current.chars().count() > options.target_passage_len {
                let score = score_text(&current, profile);
                if score > options.min_score {
                    passages.push(RefinedPassage {
                        document: section.document.clone(),
                        page: line.page,
                        text: current.trim().to_string(),
                        score,
                    });
                }
                current.clear();
            }
        }
    }

    // Trailing partial passage
    if !current.trim().is_empty() {
        let score = score_text(&current, profile);
        if score > options.min_score {
            passages.push(RefinedPassage {
                document: section.document.clone(),
                page: section.page,
                text: current.trim().to_string(),
                score,
            });
        }
    }

    passages.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.page.cmp(&b.page))
            .then_with(|| a.text.cmp(&b.text))
    });
    passages.truncate(options.max_per_section);
    passages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentLine;

    fn keyword_sentence() -> &'static str {
        // Every token is a researcher keyword, so density stays high
        "methodology approach algorithm experiment analysis evaluation performance"
    }

    fn profile() -> Profile {
        Profile::build("Researcher", "Analyze documents")
    }

    #[test]
    fn test_refine_empty_section() {
        let section = Section::new("a.pdf", "Empty", 1);
        let passages = refine_section(&section, &profile(), &RefineOptions::default());
        assert!(passages.is_empty());
    }

    #[test]
    fn test_short_sentences_discarded() {
        let mut section = Section::new("a.pdf", "Body", 1);
        section.add_line(ContentLine::new("Too short. Tiny. No.", 1));
        let passages = refine_section(&section, &profile(), &RefineOptions::default());
        assert!(passages.is_empty());
    }

    #[test]
    fn test_relevant_passage_kept() {
        let mut section = Section::new("a.pdf", "Methods", 2);
        // Six long keyword-dense sentences push past the 300-char target
        let text = format!("{}. ", keyword_sentence()).repeat(6);
        section.add_line(ContentLine::new(text, 2));

        let passages = refine_section(&section, &profile(), &RefineOptions::default());
        assert!(!passages.is_empty());
        assert_eq!(passages[0].document, "a.pdf");
        assert_eq!(passages[0].page, 2);
        assert!(passages[0].score > 0.3);
        assert!(passages[0].text.chars().count() > 300);
    }

    #[test]
    fn test_irrelevant_passage_dropped() {
        let mut section = Section::new("a.pdf", "Filler", 1);
        let filler = "these plain words carry no weight for the reader at all. ".repeat(10);
        section.add_line(ContentLine::new(filler, 1));

        let passages = refine_section(&section, &profile(), &RefineOptions::default());
        assert!(passages.is_empty());
    }

    #[test]
    fn test_trailing_chunk_uses_section_page() {
        let mut section = Section::new("a.pdf", "Methods", 7);
        // One long sentence: stays below the 300-char target, scored as
        // the trailing chunk
        let text = format!("{} {}", keyword_sentence(), keyword_sentence());
        section.add_line(ContentLine::new(format!("{}.", text), 9));

        let passages = refine_section(&section, &profile(), &RefineOptions::default());
        assert_eq!(passages.len(), 1);
        assert_eq!(passages[0].page, 7);
    }

    #[test]
    fn test_max_per_section_cap() {
        let mut section = Section::new("a.pdf", "Methods", 1);
        let text = format!("{}. ", keyword_sentence()).repeat(60);
        section.add_line(ContentLine::new(text, 1));

        let options = RefineOptions::default();
        let passages = refine_section(&section, &profile(), &options);
        assert!(passages.len() <= options.max_per_section);
    }
}
