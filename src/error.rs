use thiserror::Error;

/// Error taxonomy for the workspace orchestrator.
///
/// `Validation` never reaches the network; everything else classifies a
/// server or transport outcome so the UI can decide what to show.
#[derive(Error, Debug)]
pub enum WhisperError {
    /// Local pre-flight rejection (name too long, wrong file type, empty question)
    #[error("{0}")]
    Validation(String),

    /// Server rejected the credentials or the request's authorization
    #[error("{0}")]
    Auth(String),

    /// Transport or response-parse failure
    #[error("network error: {0}")]
    Network(String),

    /// The referenced file does not exist on the server
    #[error("file not found")]
    NotFound,

    /// Upload submission failed
    #[error("upload failed: {0}")]
    Upload(String),

    /// Summarization request failed
    #[error("summarization failed: {0}")]
    Summarize(String),

    /// Local filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration load/store error
    #[error("configuration error: {0}")]
    Config(String),

    /// Invariant breakage inside the orchestrator itself
    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, WhisperError>;
