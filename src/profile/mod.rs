//! Persona and job relevance profiles.
//!
//! A [`Profile`] is a weighted keyword set built from a persona description
//! and a job-to-be-done. Built-in lexicons cover common personas
//! (researcher, student, analyst, journalist) and jobs (literature review,
//! exam preparation, financial analysis); custom terms can be merged on
//! top. An unrecognized persona/job pair yields an empty profile, in which
//! case ranking falls back to structural signals alone.

mod lexicon;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use lexicon::{JOB_LEXICONS, PERSONA_LEXICONS};

/// A weighted keyword set used to bias relevance scoring.
///
/// Single-word terms match whitespace-separated tokens; multi-word phrases
/// match by substring occurrence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    /// Keyword or phrase -> weight
    keywords: HashMap<String, f64>,
}

impl Profile {
    /// Create an empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a profile from persona and job descriptions.
    ///
    /// Every persona lexicon whose key occurs in the lowercased persona
    /// string contributes its terms; every job lexicon any of whose key
    /// words occurs in the lowercased job string contributes its terms.
    /// Built-in terms carry weight 1.0.
    pub fn build(persona: &str, job: &str) -> Self {
        let mut profile = Self::new();

        let persona_lower = persona.to_lowercase();
        for (key, terms) in PERSONA_LEXICONS {
            if persona_lower.contains(key) {
                for term in *terms {
                    profile.add_term(*term, 1.0);
                }
            }
        }

        let job_lower = job.to_lowercase();
        for (key, terms) in JOB_LEXICONS {
            if key.split('_').any(|word| job_lower.contains(word)) {
                for term in *terms {
                    profile.add_term(*term, 1.0);
                }
            }
        }

        profile
    }

    /// Add a term with a weight. Re-adding a term keeps the larger weight.
    pub fn add_term(&mut self, term: impl Into<String>, weight: f64) {
        let term = term.into().to_lowercase();
        let entry = self.keywords.entry(term).or_insert(0.0);
        if weight > *entry {
            *entry = weight;
        }
    }

    /// Merge custom terms (e.g., from a config file) into the profile.
    pub fn merge_terms<'a, I>(&mut self, terms: I)
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        for (term, weight) in terms {
            self.add_term(term, weight);
        }
    }

    /// Check if the profile has no terms.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Check if a term is in the profile.
    pub fn contains(&self, term: &str) -> bool {
        self.keywords.contains_key(&term.to_lowercase())
    }

    /// Sum of weights of profile terms occurring in `text`, counted over
    /// its tokens for single words and by substring occurrence for
    /// phrases.
    pub fn weighted_matches(&self, text: &str) -> f64 {
        if self.keywords.is_empty() || text.is_empty() {
            return 0.0;
        }

        let normalized = normalize(text);
        let tokens: Vec<&str> = normalized.split_whitespace().collect();

        let mut total = 0.0;
        for (term, weight) in &self.keywords {
            if term.contains(' ') {
                total += count_occurrences(&normalized, term) as f64 * weight;
            } else {
                total += tokens.iter().filter(|t| *t == term).count() as f64 * weight;
            }
        }
        total
    }
}

/// Lowercase NFKC normalization for matching.
pub fn normalize(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}

/// Count of tokens in a text under profile normalization.
pub fn token_count(text: &str) -> usize {
    normalize(text).split_whitespace().count()
}

/// Non-overlapping occurrences of `needle` in `haystack`.
fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    let mut count = 0;
    let mut pos = 0;
    while let Some(found) = haystack[pos..].find(needle) {
        count += 1;
        pos += found + needle.len();
    }
    count
}
