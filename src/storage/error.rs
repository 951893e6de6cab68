use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Local capacity exhausted. Distinct from other write failures so the
    /// UI can tell the user to free up space instead of retrying.
    #[error("storage capacity exhausted: {0}")]
    QuotaExceeded(String),
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("remote store rejected request ({status}): {detail}")]
    Upstream { status: u16, detail: String },
    #[error("{0}")]
    Serialization(#[from] serde_json::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
