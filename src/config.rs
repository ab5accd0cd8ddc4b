//! Run configuration.
//!
//! An input directory may carry an optional `config.json` naming the
//! documents and the persona/job pair. Without one, every PDF in the
//! directory is analyzed with the default persona and job.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default persona when none is configured.
pub const DEFAULT_PERSONA: &str = "Academic Researcher";
/// Default job-to-be-done when none is configured.
pub const DEFAULT_JOB: &str = "Analyze and extract key insights from the provided documents";

/// Name of the optional configuration file inside the input directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Resolved configuration for an analysis run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Documents to analyze
    pub documents: Vec<PathBuf>,

    /// Persona description
    pub persona: String,

    /// Job-to-be-done description
    pub job: String,

    /// Additional profile terms with weights
    pub extra_keywords: HashMap<String, f64>,
}

impl RunConfig {
    /// Create a config for an explicit document list with defaults.
    pub fn new(documents: Vec<PathBuf>) -> Self {
        Self {
            documents,
            persona: DEFAULT_PERSONA.to_string(),
            job: DEFAULT_JOB.to_string(),
            extra_keywords: HashMap::new(),
        }
    }

    /// Resolve a run configuration from an input directory.
    ///
    /// Reads `config.json` when present; otherwise scans the directory for
    /// PDF files (case-insensitive extension), sorted by name.
    pub fn from_input_dir<P: AsRef<Path>>(input_dir: P) -> Result<Self> {
        let input_dir = input_dir.as_ref();
        let config_path = input_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Self::from_config_file(&config_path, input_dir)
        } else {
            Ok(Self::new(scan_for_pdfs(input_dir)?))
        }
    }

    /// Load a `config.json`, resolving document paths against `base_dir`.
    pub fn from_config_file<P: AsRef<Path>>(path: P, base_dir: &Path) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref())?;
        let file: ConfigFile = serde_json::from_str(&data)
            .map_err(|e| Error::Config(format!("invalid config.json: {}", e)))?;

        let documents = match file.documents {
            Some(names) => names.into_iter().map(|n| base_dir.join(n)).collect(),
            None => scan_for_pdfs(base_dir)?,
        };

        Ok(Self {
            documents,
            persona: file.persona.unwrap_or_else(|| DEFAULT_PERSONA.to_string()),
            job: file
                .job_to_be_done
                .unwrap_or_else(|| DEFAULT_JOB.to_string()),
            extra_keywords: file.extra_keywords.unwrap_or_default(),
        })
    }

    /// Override the persona.
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }

    /// Override the job-to-be-done.
    pub fn with_job(mut self, job: impl Into<String>) -> Self {
        self.job = job.into();
        self
    }

    /// Input file names (without directory components), for reporting.
    pub fn document_names(&self) -> Vec<String> {
        self.documents
            .iter()
            .map(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| p.display().to_string())
            })
            .collect()
    }
}

/// On-disk shape of `config.json`. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    documents: Option<Vec<String>>,
    persona: Option<String>,
    job_to_be_done: Option<String>,
    extra_keywords: Option<HashMap<String, f64>>,
}

/// Scan a directory for PDF files, sorted by name for determinism.
fn scan_for_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pdfs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file()
            && path
                .extension()
                .map(|e| e.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        {
            pdfs.push(path);
        }
    }
    pdfs.sort();
    Ok(pdfs)
}
