//! Error handling for the resume matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeMatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Embedding model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Embedding generation error: {0}")]
    Embedding(String),

    #[error("Skill taxonomy error: {0}")]
    Taxonomy(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeMatcherError>;

/// Model2Vec reports load and inference failures through anyhow
impl From<anyhow::Error> for ResumeMatcherError {
    fn from(err: anyhow::Error) -> Self {
        ResumeMatcherError::Embedding(err.to_string())
    }
}

impl ResumeMatcherError {
    /// True for errors caused by the caller's input rather than the engine
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ResumeMatcherError::MissingInput(_)
                | ResumeMatcherError::NotFound(_)
                | ResumeMatcherError::InvalidInput(_)
                | ResumeMatcherError::UnsupportedFormat(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(ResumeMatcherError::MissingInput("resume".into()).is_client_error());
        assert!(ResumeMatcherError::NotFound("job 42".into()).is_client_error());
        assert!(!ResumeMatcherError::ModelUnavailable("m2v".into()).is_client_error());
        assert!(!ResumeMatcherError::Embedding("boom".into()).is_client_error());
    }

    #[test]
    fn test_anyhow_conversion() {
        let err: ResumeMatcherError = anyhow::anyhow!("tokenizer missing").into();
        assert!(matches!(err, ResumeMatcherError::Embedding(ref m) if m.contains("tokenizer")));
    }
}
