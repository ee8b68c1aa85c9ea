use crate::config::settings::Settings;
use crate::config::toml_config::{InputsConfig, OutputConfig, SearchConfig, TomlConfig};
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "family-annotator")]
#[command(about = "Annotate gene families with PFAM domains and GO terms")]
pub struct CliConfig {
    /// File with one family token per line
    #[arg(long)]
    pub family_list: Option<PathBuf>,

    /// Directory holding Family<N>_target_genes.fa files
    #[arg(long)]
    pub fasta_dir: Option<PathBuf>,

    /// HMM database passed to the search tool
    #[arg(long)]
    pub pfam_db: Option<PathBuf>,

    /// pfam2go mapping file
    #[arg(long)]
    pub pfam2go: Option<PathBuf>,

    /// Output CSV path
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Directory for per-family search reports [default: hmm_results]
    #[arg(long)]
    pub tmp_dir: Option<PathBuf>,

    /// CPU threads per search, and pool size unless --workers is given [default: 4]
    #[arg(long)]
    pub threads: Option<usize>,

    /// Searches running at the same time
    #[arg(long)]
    pub workers: Option<usize>,

    /// Search program [default: hmmsearch]
    #[arg(long)]
    pub tool: Option<String>,

    /// Kill a search that runs longer than this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// TOML configuration file; command-line values take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    fn overrides(&self) -> TomlConfig {
        TomlConfig {
            inputs: InputsConfig {
                family_list: self.family_list.clone(),
                fasta_dir: self.fasta_dir.clone(),
                pfam_db: self.pfam_db.clone(),
                pfam2go: self.pfam2go.clone(),
            },
            search: SearchConfig {
                tool: self.tool.clone(),
                threads: self.threads,
                workers: self.workers,
                timeout_secs: self.timeout_secs,
            },
            output: OutputConfig {
                output: self.output.clone(),
                tmp_dir: self.tmp_dir.clone(),
            },
        }
    }

    /// Merges the optional config file with command-line values.
    pub fn resolve(&self) -> Result<Settings> {
        let base = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };
        Settings::from_config(base.overlay(self.overrides()))
    }
}
