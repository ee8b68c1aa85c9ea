pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::Settings;

pub use adapters::{CsvReportSink, TokioProcessRunner};
pub use crate::core::{
    engine::AnnotationEngine, ontology::OntologyMap, scheduler::PipelineScheduler,
    worker::AnnotationWorker,
};
pub use utils::error::{AnnotatorError, Result};
