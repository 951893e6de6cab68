mod error;
mod local;
mod remote;

use crate::model::{EventPhoto, Member};
use crate::settings::StorageSettings;
use axum::async_trait;
pub use error::StorageError;
pub use local::LocalStore;
pub use remote::RemoteStore;
use std::sync::Arc;

/// Records are append-and-delete only; no partial update exists.
#[async_trait]
pub trait Storage {
    /// Newest-first by creation timestamp.
    async fn members(&self) -> Result<Vec<Member>, StorageError>;
    /// Appends without checking for id collisions.
    async fn add_member(&self, member: Member) -> Result<(), StorageError>;
    /// No-op when no record carries the id.
    async fn delete_member(&self, id: &str) -> Result<(), StorageError>;
    /// Newest-first. The remote backend degrades to an empty list on
    /// failure instead of erroring.
    async fn event_photos(&self) -> Result<Vec<EventPhoto>, StorageError>;
    /// Persists the batch in a single write.
    async fn add_event_photos(&self, photos: &[EventPhoto]) -> Result<(), StorageError>;
}

/// Picks the backend once, at startup. Remote needs both the endpoint
/// and the key present and non-empty; anything less falls back to local
/// files. The client is built by the caller exactly once.
pub fn init(
    settings: &StorageSettings,
    client: reqwest::Client,
) -> Result<Arc<dyn Storage + Send + Sync>, StorageError> {
    match settings.remote() {
        Some((url, key)) => {
            tracing::info!("storage: remote table store at {}", url);
            Ok(Arc::new(RemoteStore::new(client, url, key)))
        }
        None => {
            tracing::info!("storage: local files under {}", settings.data_dir);
            Ok(Arc::new(LocalStore::new(&settings.data_dir)?))
        }
    }
}
