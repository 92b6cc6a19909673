use thiserror::Error;

/// Top-level error type for the DefectScan service boundary.
///
/// Adapters report provider failures with these, but the analysis pipeline
/// never passes them to its caller; it degrades to sentinel content instead.
/// The remaining variants belong to upload handling and caller-imposed
/// timeouts.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("{provider} provider is not configured: {reason}")]
    ProviderUnavailable { provider: String, reason: String },

    #[error("provider error ({provider}): {message}")]
    Provider { provider: String, message: String },

    #[error("No file uploaded")]
    NoFileUploaded,

    #[error("storage error: {0}")]
    Storage(String),

    #[error("analysis timed out after {0}s")]
    Timeout(u64),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
