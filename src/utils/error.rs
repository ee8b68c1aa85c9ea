use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnnotatorError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Cannot read family list {path}: {source}")]
    FamilyListUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read ontology mapping {path}: {source}")]
    OntologySourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AnnotatorError {
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AnnotatorError::CsvError(_) | AnnotatorError::IoError(_) => {
                "Check that the output location is writable and has free space"
            }
            AnnotatorError::ConfigError { .. } => "Check the TOML configuration file syntax",
            AnnotatorError::MissingConfigError { .. } => {
                "Pass the missing value on the command line or in the config file"
            }
            AnnotatorError::InvalidConfigValueError { .. } => {
                "Correct the configuration value and run again"
            }
            AnnotatorError::FamilyListUnreadable { .. } => {
                "Make sure the family list exists and is readable"
            }
            AnnotatorError::OntologySourceUnreadable { .. } => {
                "Make sure the pfam2go mapping file exists and is readable"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AnnotatorError::MissingConfigError { field } => {
                format!("Required setting '{}' was not provided", field)
            }
            AnnotatorError::FamilyListUnreadable { path, .. } => {
                format!("Family list '{}' could not be read", path.display())
            }
            AnnotatorError::OntologySourceUnreadable { path, .. } => {
                format!("Ontology mapping '{}' could not be read", path.display())
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnnotatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_input_messages_name_the_file() {
        let err = AnnotatorError::OntologySourceUnreadable {
            path: PathBuf::from("/data/pfam2go"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.user_friendly_message().contains("/data/pfam2go"));
        assert!(err.to_string().contains("missing"));
        assert!(err.recovery_suggestion().contains("pfam2go"));
    }

    #[test]
    fn test_missing_config_message() {
        let err = AnnotatorError::MissingConfigError {
            field: "pfam_db".to_string(),
        };
        assert_eq!(
            err.user_friendly_message(),
            "Required setting 'pfam_db' was not provided"
        );
    }
}
