use crate::core::ontology::OntologyMap;
use crate::core::worker::AnnotationWorker;
use crate::domain::model::{AnnotationFailure, AnnotationResult, FamilyId, RunSummary};
use crate::domain::ports::ReportSink;
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

pub const DEFAULT_CONCURRENCY: usize = 4;

/// Runs one worker per family with at most `concurrency` searches in flight
/// and writes results in family-list order.
pub struct PipelineScheduler {
    worker: AnnotationWorker,
    concurrency: usize,
}

impl PipelineScheduler {
    pub fn new(worker: AnnotationWorker, concurrency: usize) -> Self {
        Self {
            worker,
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub async fn run<S: ReportSink + ?Sized>(
        &self,
        families: Vec<FamilyId>,
        ontology: Arc<OntologyMap>,
        sink: &mut S,
    ) -> Result<RunSummary> {
        let started = Instant::now();
        let permits = Arc::new(Semaphore::new(self.concurrency));
        tracing::info!(
            "Annotating {} families with {} concurrent searches",
            families.len(),
            self.concurrency
        );

        // Handles stay in submission order; awaiting them in turn holds back
        // any family that finishes before its predecessors.
        let handles: Vec<(FamilyId, JoinHandle<AnnotationResult>)> = families
            .into_iter()
            .map(|family| {
                let worker = self.worker.clone();
                let ontology = Arc::clone(&ontology);
                let permits = Arc::clone(&permits);
                let task_family = family.clone();
                let handle = tokio::spawn(async move {
                    let _permit = match permits.acquire_owned().await {
                        Ok(permit) => permit,
                        Err(_) => {
                            return AnnotationResult::failed(
                                task_family,
                                AnnotationFailure::ToolFailure {
                                    reason: "worker pool shut down".to_string(),
                                },
                            )
                        }
                    };
                    worker.run(&task_family, &ontology).await
                });
                (family, handle)
            })
            .collect();

        let mut summary = RunSummary::default();
        let mut handles = handles.into_iter();
        while let Some((family, handle)) = handles.next() {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!("{}: worker task failed: {}", family, e);
                    AnnotationResult::failed(
                        family,
                        AnnotationFailure::ToolFailure {
                            reason: format!("worker task failed: {}", e),
                        },
                    )
                }
            };
            summary.record(&result);
            if let Err(e) = sink.write_result(&result) {
                // Aborting drops each task's child process, which kills it.
                for (_, pending) in handles {
                    pending.abort();
                }
                return Err(e);
            }
        }

        summary.elapsed = started.elapsed();
        Ok(summary)
    }
}
