//! # docsift
//!
//! Persona-driven PDF section extraction and relevance ranking for Rust.
//!
//! Given a set of PDF documents, a persona description, and a job-to-be-done,
//! docsift extracts the text of each document, segments it into titled
//! sections, scores every section against a weighted keyword profile, and
//! reports the most relevant sections and refined passages as JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docsift::Docsift;
//!
//! fn main() -> docsift::Result<()> {
//!     let json = Docsift::new()
//!         .with_persona("PhD Researcher")
//!         .with_job("Conduct a literature review on graph neural networks")
//!         .analyze_dir("./papers")?
//!         .to_json()?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Layout-aware extraction**: Font sizes and bold styling drive heading
//!   detection, with a plain-text fallback for odd pages
//! - **Persona profiles**: Built-in keyword lexicons for common personas and
//!   jobs, extensible with custom weighted terms
//! - **Cross-document ranking**: Sections compete across the whole set, with
//!   deterministic ordering
//! - **Parallel processing**: Uses Rayon across documents
//! - **CJK support**: Spaceless scripts are reassembled without bogus spaces

pub mod analyzer;
pub mod config;
pub mod detect;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod profile;
pub mod score;
pub mod segment;

// Re-export commonly used types
pub use analyzer::{
    DocumentAnalyzer, DEFAULT_REFINE_DEPTH, DEFAULT_TOP_PASSAGES, DEFAULT_TOP_SECTIONS,
};
pub use config::{RunConfig, DEFAULT_JOB, DEFAULT_PERSONA};
pub use detect::{detect_version_from_bytes, detect_version_from_path, is_pdf};
pub use error::{Error, Result};
pub use model::{ContentLine, DocumentContent, DocumentInfo, Section};
pub use output::{to_json, AnalysisResult, JsonFormat};
pub use parser::{ErrorMode, ParseOptions, PdfParser};
pub use profile::Profile;
pub use score::{refine_section, score_section, RefineOptions};
pub use segment::{segment_document, HeadingClassifier};

use std::path::{Path, PathBuf};

/// Parse a PDF file and return its extracted content.
///
/// # Example
///
/// ```no_run
/// use docsift::parse_file;
///
/// let content = parse_file("document.pdf").unwrap();
/// println!("Pages: {}", content.info.page_count);
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<DocumentContent> {
    let parser = PdfParser::open(path)?;
    parser.parse()
}

/// Parse a PDF file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<DocumentContent> {
    let parser = PdfParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse a PDF from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<DocumentContent> {
    let parser = PdfParser::from_bytes(data)?;
    parser.parse()
}

/// Analyze a set of PDF files under a persona and job-to-be-done.
///
/// # Example
///
/// ```no_run
/// use docsift::analyze_files;
/// use std::path::PathBuf;
///
/// let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
/// let result = analyze_files(&paths, "Student", "Exam preparation").unwrap();
/// println!("{} sections", result.extracted_sections.len());
/// ```
pub fn analyze_files(paths: &[PathBuf], persona: &str, job: &str) -> Result<AnalysisResult> {
    DocumentAnalyzer::new(persona, job).analyze_files(paths)
}

/// Analyze every PDF in a directory, honoring an optional `config.json`.
pub fn analyze_dir<P: AsRef<Path>>(input_dir: P) -> Result<AnalysisResult> {
    let config = RunConfig::from_input_dir(input_dir)?;
    DocumentAnalyzer::from_config(&config).analyze_files(&config.documents)
}

/// Builder for configuring and running an analysis.
///
/// # Example
///
/// ```no_run
/// use docsift::Docsift;
///
/// let json = Docsift::new()
///     .with_persona("Investment Analyst")
///     .with_job("Quarterly financial analysis")
///     .strict()
///     .sequential()
///     .analyze_files(&[std::path::PathBuf::from("report.pdf")])?
///     .to_json()?;
/// # Ok::<(), docsift::Error>(())
/// ```
pub struct Docsift {
    persona: String,
    job: String,
    extra_keywords: Vec<(String, f64)>,
    parse_options: ParseOptions,
    json_format: JsonFormat,
}

impl Docsift {
    /// Create a new builder with the default persona and job.
    pub fn new() -> Self {
        Self {
            persona: DEFAULT_PERSONA.to_string(),
            job: DEFAULT_JOB.to_string(),
            extra_keywords: Vec::new(),
            parse_options: ParseOptions::default(),
            json_format: JsonFormat::default(),
        }
    }

    /// Set the persona description.
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }

    /// Set the job-to-be-done.
    pub fn with_job(mut self, job: impl Into<String>) -> Self {
        self.job = job.into();
        self
    }

    /// Add a weighted keyword on top of the built-in lexicons.
    pub fn with_keyword(mut self, term: impl Into<String>, weight: f64) -> Self {
        self.extra_keywords.push((term.into(), weight));
        self
    }

    /// Fail on the first document that cannot be parsed.
    pub fn strict(mut self) -> Self {
        self.parse_options = self.parse_options.strict();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parse_options = self.parse_options.sequential();
        self
    }

    /// Emit compact JSON instead of pretty-printed.
    pub fn compact(mut self) -> Self {
        self.json_format = JsonFormat::Compact;
        self
    }

    /// Analyze a set of PDF files.
    pub fn analyze_files(self, paths: &[PathBuf]) -> Result<DocsiftResult> {
        let analyzer = self.build_analyzer();
        let result = analyzer.analyze_files(paths)?;
        Ok(DocsiftResult {
            result,
            json_format: self.json_format,
        })
    }

    /// Analyze every PDF in a directory, honoring an optional `config.json`.
    ///
    /// Builder persona/job settings take precedence over the config file
    /// only when they differ from the defaults.
    pub fn analyze_dir<P: AsRef<Path>>(self, input_dir: P) -> Result<DocsiftResult> {
        let mut config = RunConfig::from_input_dir(input_dir)?;
        if self.persona != DEFAULT_PERSONA {
            config.persona = self.persona.clone();
        }
        if self.job != DEFAULT_JOB {
            config.job = self.job.clone();
        }
        for (term, weight) in &self.extra_keywords {
            config.extra_keywords.insert(term.clone(), *weight);
        }

        let documents = config.documents.clone();
        let analyzer = DocumentAnalyzer::from_config(&config)
            .with_parse_options(self.parse_options.clone());
        let result = analyzer.analyze_files(&documents)?;
        Ok(DocsiftResult {
            result,
            json_format: self.json_format,
        })
    }

    fn build_analyzer(&self) -> DocumentAnalyzer {
        let mut config = RunConfig::new(Vec::new())
            .with_persona(self.persona.clone())
            .with_job(self.job.clone());
        for (term, weight) in &self.extra_keywords {
            config.extra_keywords.insert(term.clone(), *weight);
        }
        DocumentAnalyzer::from_config(&config).with_parse_options(self.parse_options.clone())
    }
}

impl Default for Docsift {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of an analysis run.
pub struct DocsiftResult {
    /// The analysis report
    pub result: AnalysisResult,
    json_format: JsonFormat,
}

impl DocsiftResult {
    /// Serialize the report to JSON in the configured format.
    pub fn to_json(&self) -> Result<String> {
        output::to_json(&self.result, self.json_format)
    }

    /// Get the report.
    pub fn result(&self) -> &AnalysisResult {
        &self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docsift_builder() {
        let docsift = Docsift::new()
            .with_persona("Journalist")
            .with_job("Investigate supply chains")
            .strict()
            .sequential()
            .compact();

        assert_eq!(docsift.persona, "Journalist");
        assert_eq!(docsift.parse_options.error_mode, ErrorMode::Strict);
        assert!(!docsift.parse_options.parallel);
        assert_eq!(docsift.json_format, JsonFormat::Compact);
    }

    #[test]
    fn test_docsift_builder_default() {
        let docsift = Docsift::default();
        assert_eq!(docsift.persona, DEFAULT_PERSONA);
        assert_eq!(docsift.parse_options.error_mode, ErrorMode::Lenient);
        assert_eq!(docsift.json_format, JsonFormat::Pretty);
    }

    #[test]
    fn test_docsift_builder_keywords_reach_profile() {
        let analyzer = Docsift::new().with_keyword("liability", 2.0).build_analyzer();
        assert!(analyzer.profile().contains("liability"));
    }

    #[test]
    fn test_parse_bytes_invalid() {
        assert!(parse_bytes(b"not a pdf").is_err());
    }

    #[test]
    fn test_analyze_files_empty() {
        let result = analyze_files(&[], "Researcher", "Review");
        assert!(matches!(result, Err(Error::NoDocuments)));
    }

    #[test]
    fn test_detect_valid_pdf() {
        let version = detect_version_from_bytes(b"%PDF-1.7\n%test").unwrap();
        assert_eq!(version, "1.7");
        assert!(detect::is_pdf_bytes(b"%PDF-1.4\ntest"));
        assert!(!detect::is_pdf_bytes(b"Not a PDF file"));
    }
}
