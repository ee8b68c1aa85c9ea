// Adapters layer: concrete implementations of the domain ports.

pub mod csv_sink;
pub mod process;

pub use csv_sink::CsvReportSink;
pub use process::TokioProcessRunner;
