use thiserror::Error;

/// The generator's text could not be parsed as a visualization result.
#[derive(Debug, Error)]
#[error("visualization agent did not return valid JSON:\n{raw}")]
pub struct MalformedOutputError {
    /// The offending text, unmodified
    pub raw: String,
    #[source]
    pub source: serde_json::Error,
}

#[derive(Debug, Error)]
pub enum VisualizeError {
    #[error("text generation failed: {0:#}")]
    Generation(#[source] anyhow::Error),
    #[error(transparent)]
    MalformedOutput(#[from] MalformedOutputError),
}

impl VisualizeError {
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            Self::MalformedOutput(e) => Some(&e.raw),
            Self::Generation(_) => None,
        }
    }
}
