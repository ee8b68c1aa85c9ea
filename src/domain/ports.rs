use crate::domain::model::{AnnotationResult, ProcessOutcome, ToolInvocation};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Runs the external domain-search tool. Implementations never return an
/// error; every way a run can go wrong is a `ProcessOutcome` variant.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, invocation: &ToolInvocation) -> ProcessOutcome;
}

/// Destination for annotation rows, written in family-list order.
pub trait ReportSink: Send {
    fn write_result(&mut self, result: &AnnotationResult) -> Result<()>;
    fn finish(&mut self) -> Result<()>;
}
