//! Document set analysis.
//!
//! Orchestrates the full pipeline: parse each PDF, segment it into
//! sections, score every section against the persona/job profile, rank
//! them across the whole document set, and refine the leading sections
//! into passages. The output is an [`AnalysisResult`] ready for JSON
//! serialization.

use std::cmp::Ordering;
use std::path::PathBuf;

use rayon::prelude::*;

use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::model::{DocumentContent, Section};
use crate::output::{round3, AnalysisResult, PassageAnalysis, RankedSection};
use crate::parser::{ErrorMode, ParseOptions, PdfParser};
use crate::profile::Profile;
use crate::score::{refine_section, score_section, RefineOptions};
use crate::segment::segment_document;

/// Default number of ranked sections in the report.
pub const DEFAULT_TOP_SECTIONS: usize = 10;
/// Default number of leading sections fed into passage refinement.
pub const DEFAULT_REFINE_DEPTH: usize = 5;
/// Default number of refined passages in the report.
pub const DEFAULT_TOP_PASSAGES: usize = 10;

/// Analyzer for a set of PDF documents under one persona/job profile.
///
/// Build one with [`DocumentAnalyzer::new`] or
/// [`DocumentAnalyzer::from_config`], adjust it with the builder methods,
/// then call [`analyze_files`](DocumentAnalyzer::analyze_files).
pub struct DocumentAnalyzer {
    persona: String,
    job: String,
    profile: Profile,
    parse_options: ParseOptions,
    refine_options: RefineOptions,
    top_sections: usize,
    refine_depth: usize,
    top_passages: usize,
}

impl DocumentAnalyzer {
    /// Create an analyzer for a persona and job-to-be-done.
    pub fn new(persona: impl Into<String>, job: impl Into<String>) -> Self {
        let persona = persona.into();
        let job = job.into();
        let profile = Profile::build(&persona, &job);

        Self {
            persona,
            job,
            profile,
            parse_options: ParseOptions::default(),
            refine_options: RefineOptions::default(),
            top_sections: DEFAULT_TOP_SECTIONS,
            refine_depth: DEFAULT_REFINE_DEPTH,
            top_passages: DEFAULT_TOP_PASSAGES,
        }
    }

    /// Create an analyzer from a run configuration, merging any extra
    /// keywords into the profile.
    pub fn from_config(config: &RunConfig) -> Self {
        let mut analyzer = Self::new(config.persona.clone(), config.job.clone());
        analyzer
            .profile
            .merge_terms(config.extra_keywords.iter().map(|(k, v)| (k.as_str(), *v)));
        analyzer
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Set passage refinement options.
    pub fn with_refine_options(mut self, options: RefineOptions) -> Self {
        self.refine_options = options;
        self
    }

    /// Set how many ranked sections the report keeps.
    pub fn with_top_sections(mut self, n: usize) -> Self {
        self.top_sections = n;
        self
    }

    /// Set how many leading sections feed passage refinement.
    pub fn with_refine_depth(mut self, n: usize) -> Self {
        self.refine_depth = n;
        self
    }

    /// Set how many refined passages the report keeps.
    pub fn with_top_passages(mut self, n: usize) -> Self {
        self.top_passages = n;
        self
    }

    /// The profile the analyzer scores against.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Analyze a set of PDF files.
    ///
    /// In lenient mode a document that fails to parse is logged and
    /// skipped; in strict mode the first failure aborts the run. The
    /// metadata lists every input file either way.
    pub fn analyze_files(&self, paths: &[PathBuf]) -> Result<AnalysisResult> {
        if paths.is_empty() {
            return Err(Error::NoDocuments);
        }

        let names: Vec<String> = paths
            .iter()
            .map(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| p.display().to_string())
            })
            .collect();

        let documents = self.parse_all(paths)?;

        let mut result = AnalysisResult::new(names, &self.persona, &self.job);
        self.rank_into(&documents, &mut result);
        Ok(result)
    }

    /// Analyze already extracted documents.
    pub fn analyze_documents(&self, documents: &[DocumentContent]) -> AnalysisResult {
        let names = documents.iter().map(|d| d.info.filename.clone()).collect();
        let mut result = AnalysisResult::new(names, &self.persona, &self.job);
        self.rank_into(documents, &mut result);
        result
    }

    /// Parse every input, in parallel when enabled.
    fn parse_all(&self, paths: &[PathBuf]) -> Result<Vec<DocumentContent>> {
        let parse_one = |path: &PathBuf| -> Result<DocumentContent> {
            PdfParser::open_with_options(path, self.parse_options.clone())?.parse()
        };

        let results: Vec<(usize, Result<DocumentContent>)> = if self.parse_options.parallel {
            paths
                .par_iter()
                .enumerate()
                .map(|(i, p)| (i, parse_one(p)))
                .collect()
        } else {
            paths
                .iter()
                .enumerate()
                .map(|(i, p)| (i, parse_one(p)))
                .collect()
        };

        let mut documents = Vec::with_capacity(paths.len());
        for (i, parsed) in results {
            match parsed {
                Ok(doc) => documents.push(doc),
                Err(e) => {
                    if self.parse_options.error_mode == ErrorMode::Strict {
                        return Err(e);
                    }
                    log::warn!("Skipping {}: {}", paths[i].display(), e);
                }
            }
        }
        Ok(documents)
    }

    /// Segment, score, rank, and refine into the result.
    fn rank_into(&self, documents: &[DocumentContent], result: &mut AnalysisResult) {
        let mut scored: Vec<(Section, f64)> = Vec::new();
        for document in documents {
            for section in segment_document(document) {
                let score = score_section(&section, &self.profile);
                scored.push((section, score));
            }
        }

        // Score descending; ties break on document, page, then title so
        // the same inputs always produce the same report
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.document.cmp(&b.0.document))
                .then_with(|| a.0.page.cmp(&b.0.page))
                .then_with(|| a.0.title.cmp(&b.0.title))
        });
        scored.truncate(self.top_sections);

        result.extracted_sections = scored
            .iter()
            .map(|(section, score)| RankedSection {
                document: section.document.clone(),
                page_number: section.page,
                section_title: section.title.clone(),
                importance_rank: round3(*score),
            })
            .collect();

        let mut passages = Vec::new();
        for (section, _) in scored.iter().take(self.refine_depth) {
            passages.extend(refine_section(section, &self.profile, &self.refine_options));
        }

        passages.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.document.cmp(&b.document))
                .then_with(|| a.page.cmp(&b.page))
                .then_with(|| a.text.cmp(&b.text))
        });
        passages.truncate(self.top_passages);

        result.sub_section_analysis = passages
            .into_iter()
            .map(|p| PassageAnalysis {
                document: p.document,
                page_number: p.page,
                refined_text: p.text,
                relevance_score: round3(p.score),
            })
            .collect();
    }
}
