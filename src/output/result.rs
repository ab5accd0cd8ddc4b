//! Analysis result types.
//!
//! Field names follow the report schema consumed downstream:
//! `metadata` / `extracted_sections` / `sub_section_analysis`.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// The full analysis report for a document set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Run metadata
    pub metadata: AnalysisMetadata,

    /// Top-ranked sections across all documents
    pub extracted_sections: Vec<RankedSection>,

    /// Most relevant refined passages from the leading sections
    pub sub_section_analysis: Vec<PassageAnalysis>,
}

impl AnalysisResult {
    /// Create an empty result shell for the given run.
    pub fn new(input_documents: Vec<String>, persona: &str, job: &str) -> Self {
        Self {
            metadata: AnalysisMetadata::new(input_documents, persona, job),
            extracted_sections: Vec::new(),
            sub_section_analysis: Vec::new(),
        }
    }

    /// Create an error result: empty section lists with the error recorded
    /// in metadata, so a failed run still produces valid output.
    pub fn with_error(
        input_documents: Vec<String>,
        persona: &str,
        job: &str,
        error: impl Into<String>,
    ) -> Self {
        let mut result = Self::new(input_documents, persona, job);
        result.metadata.error = Some(error.into());
        result
    }
}

/// Metadata describing an analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Input file names
    pub input_documents: Vec<String>,

    /// Persona description used for scoring
    pub persona: String,

    /// Job-to-be-done description used for scoring
    pub job_to_be_done: String,

    /// RFC 3339 UTC timestamp of the run
    pub processing_timestamp: String,

    /// Error message when the run failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisMetadata {
    /// Create metadata stamped with the current time.
    pub fn new(input_documents: Vec<String>, persona: &str, job: &str) -> Self {
        Self {
            input_documents,
            persona: persona.to_string(),
            job_to_be_done: job.to_string(),
            processing_timestamp: Utc::now().to_rfc3339(),
            error: None,
        }
    }
}

/// A ranked section entry in the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedSection {
    /// File name of the source document
    pub document: String,

    /// Page the section heading appears on (1-indexed)
    pub page_number: u32,

    /// The section heading text
    pub section_title: String,

    /// Relevance score, rounded to 3 decimals; entries are ordered most
    /// relevant first
    pub importance_rank: f64,
}

/// A refined passage entry in the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassageAnalysis {
    /// File name of the source document
    pub document: String,

    /// Page the passage was completed on (1-indexed)
    pub page_number: u32,

    /// The refined passage text
    pub refined_text: String,

    /// Relevance score, rounded to 3 decimals
    pub relevance_score: f64,
}

/// Round a score to 3 decimal places for reporting.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round3() {
        assert_eq!(round3(0.123456), 0.123);
        assert_eq!(round3(2.9996), 3.0);
        assert_eq!(round3(0.0), 0.0);
    }

    #[test]
    fn test_error_result() {
        let result = AnalysisResult::with_error(
            vec!["a.pdf".to_string()],
            "Researcher",
            "Literature review",
            "boom",
        );
        assert!(result.extracted_sections.is_empty());
        assert!(result.sub_section_analysis.is_empty());
        assert_eq!(result.metadata.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_metadata_timestamp_is_rfc3339() {
        let meta = AnalysisMetadata::new(vec![], "p", "j");
        assert!(chrono::DateTime::parse_from_rfc3339(&meta.processing_timestamp).is_ok());
    }

    #[test]
    fn test_error_field_omitted_when_none() {
        let result = AnalysisResult::new(vec![], "p", "j");
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("\"error\""));
    }
}
