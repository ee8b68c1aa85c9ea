use crate::domain::model::AnnotationResult;
use crate::domain::ports::ReportSink;
use crate::utils::error::{AnnotatorError, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const REPORT_HEADER: [&str; 3] = ["Family", "PFAM_Domains", "GO_Terms"];

/// Writes `Family,PFAM_Domains,GO_Terms` rows, flushing after each family so
/// partial progress is visible while long searches are still running.
pub struct CsvReportSink<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvReportSink<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> CsvReportSink<W> {
    pub fn new(inner: W) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(inner);
        writer.write_record(REPORT_HEADER)?;
        writer.flush()?;
        Ok(Self { writer })
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| AnnotatorError::IoError(e.into_error()))
    }
}

impl<W: Write + Send> ReportSink for CsvReportSink<W> {
    fn write_result(&mut self, result: &AnnotationResult) -> Result<()> {
        self.writer.write_record(result.to_row())?;
        self.writer.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{AnnotationFailure, DomainCount, FamilyId};
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    fn written(results: &[AnnotationResult]) -> String {
        let mut sink = CsvReportSink::new(Vec::new()).unwrap();
        for result in results {
            sink.write_result(result).unwrap();
        }
        sink.finish().unwrap();
        String::from_utf8(sink.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_header_only_for_empty_run() {
        assert_eq!(written(&[]), "Family,PFAM_Domains,GO_Terms\n");
    }

    #[test]
    fn test_annotated_and_failed_rows() {
        let annotated = AnnotationResult::annotated(
            FamilyId::new("family1"),
            vec![
                DomainCount {
                    domain_id: "PF00001".to_string(),
                    model_name: "7tm_1".to_string(),
                    count: 4,
                },
                DomainCount {
                    domain_id: "PF00067".to_string(),
                    model_name: "p450".to_string(),
                    count: 1,
                },
            ],
            BTreeSet::from(["GO:0004930".to_string(), "GO:0007165".to_string()]),
        );
        let missing = AnnotationResult::failed(
            FamilyId::new("family3"),
            AnnotationFailure::FileNotFound {
                path: PathBuf::from("fasta/Family3_target_genes.fa"),
            },
        );
        assert_eq!(
            written(&[annotated, missing]),
            "Family,PFAM_Domains,GO_Terms\n\
             family1,PF00001 (7tm_1):4;PF00067 (p450):1,GO:0004930;GO:0007165\n\
             family3,File not found,\n"
        );
    }

    #[test]
    fn test_annotated_family_without_hits_has_empty_fields() {
        let empty = AnnotationResult::annotated(FamilyId::new("family9"), vec![], BTreeSet::new());
        assert_eq!(
            written(&[empty]),
            "Family,PFAM_Domains,GO_Terms\nfamily9,,\n"
        );
    }

    #[test]
    fn test_error_text_with_comma_is_quoted() {
        let failed = AnnotationResult::failed(
            FamilyId::new("family5"),
            AnnotationFailure::ToolFailure {
                reason: "hmmsearch exited with status 1, see logs".to_string(),
            },
        );
        let text = written(&[failed]);
        assert!(text.ends_with("family5,\"Error: hmmsearch exited with status 1, see logs\",\n"));
    }

    #[test]
    fn test_create_makes_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("annotation.csv");
        let mut sink = CsvReportSink::create(&path).unwrap();
        sink.finish().unwrap();
        drop(sink);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Family,PFAM_Domains,GO_Terms\n"
        );
    }
}
