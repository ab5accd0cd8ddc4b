//! JSON rendering of analysis results.

use crate::error::{Error, Result};

use super::result::AnalysisResult;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize an analysis result to JSON.
pub fn to_json(result: &AnalysisResult, format: JsonFormat) -> Result<String> {
    let rendered = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(result),
        JsonFormat::Compact => serde_json::to_string(result),
    };

    rendered.map_err(|e| Error::Output(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{RankedSection, round3};

    fn sample_result() -> AnalysisResult {
        let mut result = AnalysisResult::new(
            vec!["paper.pdf".to_string()],
            "Researcher",
            "Literature review",
        );
        result.extracted_sections.push(RankedSection {
            document: "paper.pdf".to_string(),
            page_number: 2,
            section_title: "Related Work".to_string(),
            importance_rank: round3(1.23456),
        });
        result
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample_result(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"extracted_sections\""));
        assert!(json.contains("\"sub_section_analysis\""));
        assert!(json.contains("\"importance_rank\": 1.235"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample_result(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"job_to_be_done\":\"Literature review\""));
    }
}
