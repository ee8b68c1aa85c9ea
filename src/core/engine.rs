use crate::adapters::csv_sink::CsvReportSink;
use crate::config::settings::Settings;
use crate::core::ontology::OntologyMap;
use crate::core::scheduler::PipelineScheduler;
use crate::core::worker::AnnotationWorker;
use crate::domain::model::{FamilyId, RunSummary};
use crate::domain::ports::{ProcessRunner, ReportSink};
use crate::utils::error::{AnnotatorError, Result};
use std::path::Path;
use std::sync::Arc;

/// Reads the family list: one token per line, lower-cased, blank lines skipped.
pub fn read_family_list<P: AsRef<Path>>(path: P) -> Result<Vec<FamilyId>> {
    let path = path.as_ref();
    let content =
        std::fs::read_to_string(path).map_err(|source| AnnotatorError::FamilyListUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(content
        .lines()
        // Blank lines name no family, so they get no row.
        .filter(|line| !line.trim().is_empty())
        .map(FamilyId::new)
        .collect())
}

pub struct AnnotationEngine {
    settings: Settings,
    runner: Arc<dyn ProcessRunner>,
}

impl AnnotationEngine {
    pub fn new(settings: Settings, runner: Arc<dyn ProcessRunner>) -> Self {
        Self { settings, runner }
    }

    /// Loads the inputs, then annotates every family into the output CSV.
    /// Only unreadable inputs or an unwritable output end the run early.
    pub async fn run(&self) -> Result<RunSummary> {
        std::fs::create_dir_all(&self.settings.tmp_dir)?;

        let families = read_family_list(&self.settings.family_list)?;
        tracing::info!(
            "Read {} families from {}",
            families.len(),
            self.settings.family_list.display()
        );

        let ontology = Arc::new(OntologyMap::load(&self.settings.pfam2go)?);
        tracing::info!("Loaded GO terms for {} PFAM domains", ontology.len());

        let mut sink = CsvReportSink::create(&self.settings.output)?;
        let summary = self.run_with_sink(families, ontology, &mut sink).await?;
        sink.finish()?;
        Ok(summary)
    }

    pub async fn run_with_sink<S: ReportSink + ?Sized>(
        &self,
        families: Vec<FamilyId>,
        ontology: Arc<OntologyMap>,
        sink: &mut S,
    ) -> Result<RunSummary> {
        let worker = AnnotationWorker::new(self.settings.worker_settings(), self.runner.clone());
        let scheduler = PipelineScheduler::new(worker, self.settings.workers);
        let summary = scheduler.run(families, ontology, sink).await?;
        tracing::info!(
            "Annotated {}/{} families ({} missing input, {} search failures) in {:.1?}",
            summary.annotated,
            summary.families,
            summary.missing_input,
            summary.tool_failures,
            summary.elapsed
        );
        Ok(summary)
    }
}
