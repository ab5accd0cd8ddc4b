//! Analysis result assembly and JSON serialization.

mod json;
mod result;

pub use json::{to_json, JsonFormat};
pub use result::{round3, AnalysisMetadata, AnalysisResult, PassageAnalysis, RankedSection};
