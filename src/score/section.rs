//! Section-level relevance scoring.

use crate::model::Section;
use crate::profile::{normalize, token_count, Profile};

/// Keyword density multiplier.
const DENSITY_WEIGHT: f64 = 10.0;
/// Bonus for structurally important section titles.
const STRUCTURAL_BONUS: f64 = 2.0;
/// Bonus for substantial sections (> 500 chars of body text).
const LONG_BODY_BONUS: f64 = 1.0;
/// Bonus for moderate sections (> 200 chars of body text).
const MEDIUM_BODY_BONUS: f64 = 0.5;

/// Titles that signal structurally important sections regardless of
/// keyword matches.
const STRUCTURAL_TITLES: &[&str] = &[
    "abstract",
    "introduction",
    "conclusion",
    "summary",
    "results",
    "methodology",
];

/// Score a section against a profile.
///
/// The score is the weighted keyword density of the combined title and
/// body (scaled by 10), plus a bonus when the title names a structurally
/// important section, plus a bonus for substantial body length.
pub fn score_section(section: &Section, profile: &Profile) -> f64 {
    let full_text = section.full_text();
    let mut score = score_text(&full_text, profile) * DENSITY_WEIGHT;

    let title_lower = normalize(&section.title);
    if STRUCTURAL_TITLES
        .iter()
        .any(|t| title_lower.contains(t))
    {
        score += STRUCTURAL_BONUS;
    }

    let body_len = section.body_text().chars().count();
    if body_len > 500 {
        score += LONG_BODY_BONUS;
    } else if body_len > 200 {
        score += MEDIUM_BODY_BONUS;
    }

    score
}

/// Weighted keyword density of a text: matched weight divided by token
/// count. Empty text scores 0.
pub fn score_text(text: &str, profile: &Profile) -> f64 {
    let tokens = token_count(text);
    if tokens == 0 {
        return 0.0;
    }
    profile.weighted_matches(text) / tokens as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentLine;

    fn researcher_profile() -> Profile {
        Profile::build("Researcher", "Analyze documents")
    }

    fn section_with_body(title: &str, body: &str) -> Section {
        let mut section = Section::new("paper.pdf", title, 1);
        section.add_line(ContentLine::new(body, 1));
        section
    }

    #[test]
    fn test_score_text_density() {
        let profile = researcher_profile();
        // 2 matches out of 4 tokens
        let score = score_text("methodology and benchmark results", &profile);
        // "results" is also a researcher keyword: 3 of 4 tokens match
        assert!((score - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_score_text_empty() {
        let profile = researcher_profile();
        assert_eq!(score_text("", &profile), 0.0);
        assert_eq!(score_text("   ", &profile), 0.0);
    }

    #[test]
    fn test_structural_bonus() {
        let profile = Profile::new();
        let section = section_with_body("Introduction", "nothing relevant here");
        let score = score_section(&section, &profile);
        assert!((score - STRUCTURAL_BONUS).abs() < 1e-9);

        let section = section_with_body("4.2 Results Overview", "nothing relevant here");
        let score = score_section(&section, &profile);
        assert!((score - STRUCTURAL_BONUS).abs() < 1e-9);

        let section = section_with_body("Acknowledgements", "nothing relevant here");
        assert_eq!(score_section(&section, &profile), 0.0);
    }

    #[test]
    fn test_length_bonus() {
        let profile = Profile::new();

        let medium = "x".repeat(250);
        let section = section_with_body("Appendix", &medium);
        assert!((score_section(&section, &profile) - MEDIUM_BODY_BONUS).abs() < 1e-9);

        let long = "x".repeat(600);
        let section = section_with_body("Appendix", &long);
        assert!((score_section(&section, &profile) - LONG_BODY_BONUS).abs() < 1e-9);

        let short = "x".repeat(100);
        let section = section_with_body("Appendix", &short);
        assert_eq!(score_section(&section, &profile), 0.0);
    }

    #[test]
    fn test_keyword_density_scaled() {
        let profile = researcher_profile();
        // Title "Approach" is a keyword; body has none.
        // full_text = "Approach unrelated words here" -> 1 of 4 tokens
        let section = section_with_body("Approach", "unrelated words here");
        let score = score_section(&section, &profile);
        assert!((score - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_profile_scores_structure_only() {
        let profile = Profile::new();
        let mut section = Section::new("a.pdf", "Summary", 3);
        section.add_line(ContentLine::new("s".repeat(600), 3));
        let score = score_section(&section, &profile);
        assert!((score - (STRUCTURAL_BONUS + LONG_BODY_BONUS)).abs() < 1e-9);
    }
}
