pub mod engine;
pub mod hit_parser;
pub mod ontology;
pub mod scheduler;
pub mod worker;

pub use crate::domain::model::{AnnotationResult, DomainCount, FamilyId};
pub use crate::domain::ports::{ProcessRunner, ReportSink};
pub use crate::utils::error::Result;
