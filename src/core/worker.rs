use crate::core::hit_parser::{parse_best_hits, parse_domain_presence, DEFAULT_PRESENCE_EVALUE};
use crate::core::ontology::OntologyMap;
use crate::domain::model::{
    AnnotationFailure, AnnotationResult, FamilyId, ProcessOutcome, ToolInvocation,
};
use crate::domain::ports::ProcessRunner;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct WorkerSettings {
    pub sequence_dir: PathBuf,
    pub domain_db: PathBuf,
    pub report_dir: PathBuf,
    pub tool: String,
    /// Passed to the tool as `--cpu`.
    pub tool_threads: usize,
}

impl WorkerSettings {
    pub fn sequence_path(&self, family: &FamilyId) -> PathBuf {
        self.sequence_dir.join(family.sequence_file_name())
    }

    pub fn report_path(&self, family: &FamilyId) -> PathBuf {
        self.report_dir.join(family.report_file_name())
    }
}

/// Annotates one family. Every failure ends up inside the returned
/// `AnnotationResult`; nothing here aborts the run.
#[derive(Clone)]
pub struct AnnotationWorker {
    settings: Arc<WorkerSettings>,
    runner: Arc<dyn ProcessRunner>,
}

impl AnnotationWorker {
    pub fn new(settings: WorkerSettings, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            settings: Arc::new(settings),
            runner,
        }
    }

    pub fn settings(&self) -> &WorkerSettings {
        &self.settings
    }

    pub async fn run(&self, family: &FamilyId, ontology: &OntologyMap) -> AnnotationResult {
        match self.annotate(family, ontology).await {
            Ok(result) => result,
            Err(failure) => {
                tracing::warn!("{}: {}", family, failure);
                AnnotationResult::failed(family.clone(), failure)
            }
        }
    }

    async fn annotate(
        &self,
        family: &FamilyId,
        ontology: &OntologyMap,
    ) -> Result<AnnotationResult, AnnotationFailure> {
        let sequence_path = self.settings.sequence_path(family);
        if !tokio::fs::try_exists(&sequence_path).await.unwrap_or(false) {
            return Err(AnnotationFailure::FileNotFound {
                path: sequence_path,
            });
        }

        tokio::fs::create_dir_all(&self.settings.report_dir)
            .await
            .map_err(|e| AnnotationFailure::ToolFailure {
                reason: format!(
                    "cannot create report directory {}: {}",
                    self.settings.report_dir.display(),
                    e
                ),
            })?;

        let invocation = ToolInvocation {
            program: self.settings.tool.clone(),
            report_path: self.settings.report_path(family),
            cpu: self.settings.tool_threads,
            domain_db: self.settings.domain_db.clone(),
            sequence_path,
        };

        tracing::debug!("{}: running {}", family, invocation.program);
        let tool = &invocation.program;
        match self.runner.run(&invocation).await {
            ProcessOutcome::Success => {}
            ProcessOutcome::ExitFailure(Some(code)) => {
                return Err(tool_failure(format!("{} exited with status {}", tool, code)))
            }
            ProcessOutcome::ExitFailure(None) => {
                return Err(tool_failure(format!("{} was terminated by a signal", tool)))
            }
            ProcessOutcome::LaunchFailure(reason) => {
                return Err(tool_failure(format!("failed to launch {}: {}", tool, reason)))
            }
            ProcessOutcome::TimedOut(limit) => {
                return Err(tool_failure(format!(
                    "{} timed out after {}s",
                    tool,
                    limit.as_secs_f64()
                )))
            }
        }

        let report = tokio::fs::read(&invocation.report_path)
            .await
            .map_err(|e| {
                tool_failure(format!(
                    "cannot read report {}: {}",
                    invocation.report_path.display(),
                    e
                ))
            })?;

        let domains = parse_best_hits(report.as_slice())
            .map_err(|e| tool_failure(format!("cannot parse report: {}", e)))?;
        if let Ok(present) = parse_domain_presence(report.as_slice(), DEFAULT_PRESENCE_EVALUE) {
            tracing::debug!(
                "{}: {} best-hit groups, {} domains below e-value {}",
                family,
                domains.len(),
                present.len(),
                DEFAULT_PRESENCE_EVALUE
            );
        }

        let terms: BTreeSet<String> = domains
            .iter()
            .flat_map(|d| ontology.lookup(&d.domain_id).iter().cloned())
            .collect();

        Ok(AnnotationResult::annotated(family.clone(), domains, terms))
    }
}

fn tool_failure(reason: String) -> AnnotationFailure {
    AnnotationFailure::ToolFailure { reason }
}
