use crate::settings::{RosterSettings, Settings};
use crate::storage::{self, Storage, StorageError};
use std::sync::Arc;

/// Shared handles cloned into every request.
#[derive(Clone)]
pub struct Handles {
    pub storage: Arc<dyn Storage + Sync + Send>,
    pub roster: Arc<RosterSettings>,
}

impl Handles {
    /// Built once at startup; the selected provider owns the process-wide
    /// HTTP client from here on.
    pub fn new(settings: &Settings) -> Result<Self, StorageError> {
        let client = reqwest::Client::new();
        let instance = Self {
            storage: storage::init(&settings.storage, client)?,
            roster: Arc::new(settings.roster.clone()),
        };
        Ok(instance)
    }
}
