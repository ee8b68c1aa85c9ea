use crate::config::toml_config::TomlConfig;
use crate::core::scheduler::DEFAULT_CONCURRENCY;
use crate::core::worker::WorkerSettings;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number,
    validate_range, validate_required_field, Validate,
};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TMP_DIR: &str = "hmm_results";
pub const DEFAULT_TOOL: &str = "hmmsearch";
const MAX_TIMEOUT_SECS: u64 = 7 * 24 * 3600;

/// Fully resolved run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub family_list: PathBuf,
    pub fasta_dir: PathBuf,
    pub pfam_db: PathBuf,
    pub pfam2go: PathBuf,
    pub output: PathBuf,
    pub tmp_dir: PathBuf,
    /// `--cpu` hint handed to every search.
    pub threads: usize,
    /// Number of searches allowed to run at once.
    pub workers: usize,
    pub tool: String,
    pub timeout: Option<Duration>,
}

impl Settings {
    pub fn from_config(config: TomlConfig) -> Result<Self> {
        let inputs = config.inputs;
        let threads = config.search.threads.unwrap_or(DEFAULT_CONCURRENCY);
        Ok(Self {
            family_list: validate_required_field("family_list", &inputs.family_list)?.clone(),
            fasta_dir: validate_required_field("fasta_dir", &inputs.fasta_dir)?.clone(),
            pfam_db: validate_required_field("pfam_db", &inputs.pfam_db)?.clone(),
            pfam2go: validate_required_field("pfam2go", &inputs.pfam2go)?.clone(),
            output: validate_required_field("output", &config.output.output)?.clone(),
            tmp_dir: config
                .output
                .tmp_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TMP_DIR)),
            threads,
            workers: config.search.workers.unwrap_or(threads),
            tool: config
                .search
                .tool
                .unwrap_or_else(|| DEFAULT_TOOL.to_string()),
            timeout: config.search.timeout_secs.map(Duration::from_secs),
        })
    }

    pub fn worker_settings(&self) -> WorkerSettings {
        WorkerSettings {
            sequence_dir: self.fasta_dir.clone(),
            domain_db: self.pfam_db.clone(),
            report_dir: self.tmp_dir.clone(),
            tool: self.tool.clone(),
            tool_threads: self.threads,
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("family_list", &self.family_list)?;
        // A missing sequence directory surfaces as per-family "File not found" rows.
        validate_path("fasta_dir", &self.fasta_dir)?;
        validate_path("pfam_db", &self.pfam_db)?;
        validate_path("pfam2go", &self.pfam2go)?;
        validate_path("output", &self.output)?;
        validate_path("tmp_dir", &self.tmp_dir)?;
        validate_positive_number("threads", self.threads, 1)?;
        validate_positive_number("workers", self.workers, 1)?;
        validate_non_empty_string("tool", &self.tool)?;
        if let Some(timeout) = self.timeout {
            validate_range("timeout_secs", timeout.as_secs(), 1, MAX_TIMEOUT_SECS)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::AnnotatorError;

    fn complete_config(fasta_dir: PathBuf) -> TomlConfig {
        let mut config = TomlConfig::default();
        config.inputs.family_list = Some(PathBuf::from("families.txt"));
        config.inputs.fasta_dir = Some(fasta_dir);
        config.inputs.pfam_db = Some(PathBuf::from("Pfam-A.hmm"));
        config.inputs.pfam2go = Some(PathBuf::from("pfam2go.txt"));
        config.output.output = Some(PathBuf::from("annotation.csv"));
        config
    }

    #[test]
    fn test_defaults_applied() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::from_config(complete_config(dir.path().to_path_buf())).unwrap();
        assert_eq!(settings.tmp_dir, PathBuf::from("hmm_results"));
        assert_eq!(settings.threads, 4);
        assert_eq!(settings.workers, 4);
        assert_eq!(settings.tool, "hmmsearch");
        assert_eq!(settings.timeout, None);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_workers_follow_threads_unless_set() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = complete_config(dir.path().to_path_buf());
        config.search.threads = Some(8);
        let settings = Settings::from_config(config.clone()).unwrap();
        assert_eq!(settings.workers, 8);

        config.search.workers = Some(2);
        let settings = Settings::from_config(config).unwrap();
        assert_eq!(settings.workers, 2);
        assert_eq!(settings.worker_settings().tool_threads, 8);
    }

    #[test]
    fn test_missing_required_field() {
        let mut config = complete_config(PathBuf::from("fasta"));
        config.inputs.pfam2go = None;
        let err = Settings::from_config(config).unwrap_err();
        match err {
            AnnotatorError::MissingConfigError { field } => assert_eq!(field, "pfam2go"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = complete_config(dir.path().to_path_buf());
        config.search.threads = Some(0);
        assert!(Settings::from_config(config).unwrap().validate().is_err());

        let mut config = complete_config(dir.path().to_path_buf());
        config.search.timeout_secs = Some(MAX_TIMEOUT_SECS + 1);
        assert!(Settings::from_config(config).unwrap().validate().is_err());
    }

    #[test]
    fn test_missing_sequence_dir_is_not_a_config_error() {
        let settings =
            Settings::from_config(complete_config(PathBuf::from("/nonexistent_fasta"))).unwrap();
        assert!(settings.validate().is_ok());
    }
}
