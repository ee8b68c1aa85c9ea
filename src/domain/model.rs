use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Lower-cased family token as read from the family list, e.g. `family12`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FamilyId(String);

impl FamilyId {
    pub fn new(token: &str) -> Self {
        Self(token.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trailing digits of the token. Tokens without a numeric suffix fall back
    /// to the token with its `family` prefix removed.
    pub fn number(&self) -> &str {
        let stem = self.0.trim_end_matches(|c: char| c.is_ascii_digit());
        let digits = &self.0[stem.len()..];
        if digits.is_empty() {
            self.0.strip_prefix("family").unwrap_or(&self.0)
        } else {
            digits
        }
    }

    pub fn sequence_file_name(&self) -> String {
        format!("Family{}_target_genes.fa", self.number())
    }

    pub fn report_file_name(&self) -> String {
        format!("{}_hmmsearch.tbl", self.0)
    }
}

impl fmt::Display for FamilyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One data row of the search tool's tabular report.
#[derive(Debug, Clone, PartialEq)]
pub struct RawHit {
    pub sequence_id: String,
    pub model_name: String,
    pub domain_id: String,
    pub e_value: f64,
}

/// Lowest e-value hit retained for a sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct BestHit {
    pub domain_id: String,
    pub model_name: String,
    pub e_value: f64,
}

/// Number of sequences in a family whose best hit is `(domain_id, model_name)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainCount {
    pub domain_id: String,
    pub model_name: String,
    pub count: usize,
}

impl fmt::Display for DomainCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}):{}", self.domain_id, self.model_name, self.count)
    }
}

/// Per-family failure. `Display` is the text written into the output row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnotationFailure {
    #[error("File not found")]
    FileNotFound { path: PathBuf },

    #[error("Error: {reason}")]
    ToolFailure { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationOutcome {
    Annotated {
        domains: Vec<DomainCount>,
        terms: BTreeSet<String>,
    },
    Failed(AnnotationFailure),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationResult {
    pub family: FamilyId,
    pub outcome: AnnotationOutcome,
}

impl AnnotationResult {
    pub fn annotated(family: FamilyId, domains: Vec<DomainCount>, terms: BTreeSet<String>) -> Self {
        Self {
            family,
            outcome: AnnotationOutcome::Annotated { domains, terms },
        }
    }

    pub fn failed(family: FamilyId, failure: AnnotationFailure) -> Self {
        Self {
            family,
            outcome: AnnotationOutcome::Failed(failure),
        }
    }

    /// The three output columns: family, domain profile, ontology terms.
    pub fn to_row(&self) -> [String; 3] {
        match &self.outcome {
            AnnotationOutcome::Annotated { domains, terms } => [
                self.family.to_string(),
                domains
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(";"),
                terms.iter().cloned().collect::<Vec<_>>().join(";"),
            ],
            AnnotationOutcome::Failed(failure) => {
                [self.family.to_string(), failure.to_string(), String::new()]
            }
        }
    }
}

/// Arguments for one domain-search run over a family's sequence file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: String,
    pub report_path: PathBuf,
    pub cpu: usize,
    pub domain_db: PathBuf,
    pub sequence_path: PathBuf,
}

impl ToolInvocation {
    pub fn args(&self) -> Vec<OsString> {
        vec![
            OsString::from("--tblout"),
            self.report_path.clone().into_os_string(),
            OsString::from("--noali"),
            OsString::from("--cpu"),
            OsString::from(self.cpu.to_string()),
            self.domain_db.clone().into_os_string(),
            self.sequence_path.clone().into_os_string(),
        ]
    }
}

/// Result of one external tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    Success,
    ExitFailure(Option<i32>),
    LaunchFailure(String),
    TimedOut(Duration),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub families: usize,
    pub annotated: usize,
    pub missing_input: usize,
    pub tool_failures: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn record(&mut self, result: &AnnotationResult) {
        self.families += 1;
        match &result.outcome {
            AnnotationOutcome::Annotated { .. } => self.annotated += 1,
            AnnotationOutcome::Failed(AnnotationFailure::FileNotFound { .. }) => {
                self.missing_input += 1
            }
            AnnotationOutcome::Failed(AnnotationFailure::ToolFailure { .. }) => {
                self.tool_failures += 1
            }
        }
    }
}
