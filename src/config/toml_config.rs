use crate::utils::error::{AnnotatorError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file layout. Every field is optional so the same shape can
/// carry command-line overrides; `Settings::from_config` enforces what is
/// required.
///
/// ```toml
/// [inputs]
/// family_list = "families.txt"
/// fasta_dir = "fasta"
/// pfam_db = "${PFAM_HOME}/Pfam-A.hmm"
/// pfam2go = "pfam2go.txt"
///
/// [search]
/// threads = 8
/// timeout_secs = 3600
///
/// [output]
/// output = "annotation.csv"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub inputs: InputsConfig,
    pub search: SearchConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputsConfig {
    pub family_list: Option<PathBuf>,
    pub fasta_dir: Option<PathBuf>,
    pub pfam_db: Option<PathBuf>,
    pub pfam2go: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub tool: Option<String>,
    pub threads: Option<usize>,
    pub workers: Option<usize>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub output: Option<PathBuf>,
    pub tmp_dir: Option<PathBuf>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;
        toml::from_str(&processed).map_err(|e| AnnotatorError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AnnotatorError::ConfigError {
            message: e.to_string(),
        })?;
        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });
        Ok(result.into_owned())
    }

    /// Values set in `top` win over values in `self`.
    pub fn overlay(self, top: TomlConfig) -> TomlConfig {
        TomlConfig {
            inputs: InputsConfig {
                family_list: top.inputs.family_list.or(self.inputs.family_list),
                fasta_dir: top.inputs.fasta_dir.or(self.inputs.fasta_dir),
                pfam_db: top.inputs.pfam_db.or(self.inputs.pfam_db),
                pfam2go: top.inputs.pfam2go.or(self.inputs.pfam2go),
            },
            search: SearchConfig {
                tool: top.search.tool.or(self.search.tool),
                threads: top.search.threads.or(self.search.threads),
                workers: top.search.workers.or(self.search.workers),
                timeout_secs: top.search.timeout_secs.or(self.search.timeout_secs),
            },
            output: OutputConfig {
                output: top.output.output.or(self.output.output),
                tmp_dir: top.output.tmp_dir.or(self.output.tmp_dir),
            },
        }
    }
}
