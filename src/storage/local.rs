use super::{Storage, StorageError};
use crate::model::{EventPhoto, Member};
use axum::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

const MEMBERS_FILE: &str = "membros.json";
const PHOTOS_FILE: &str = "fotos_evento.json";

/// One JSON array per collection, rewritten whole on every mutation.
pub struct LocalStore {
    members: Collection<Member>,
    photos: Collection<EventPhoto>,
}

impl LocalStore {
    pub fn new(directory: impl AsRef<Path>) -> Result<Self, StorageError> {
        let directory = directory.as_ref();
        std::fs::create_dir_all(directory)?;
        Ok(Self {
            members: Collection::new(directory.join(MEMBERS_FILE)),
            photos: Collection::new(directory.join(PHOTOS_FILE)),
        })
    }
}

/// The lock spans the whole read-modify-write cycle; the file carries no
/// version check.
struct Collection<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _marker: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> Collection<T> {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    /// Absent or malformed files read as an empty collection.
    async fn read(&self) -> Vec<T> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    async fn update(&self, apply: impl FnOnce(&mut Vec<T>)) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut items = self.load().await;
        apply(&mut items);
        let bytes = serde_json::to_vec(&items)?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| self.classify_write_error(e))
    }

    async fn load(&self) -> Vec<T> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    fn classify_write_error(&self, error: std::io::Error) -> StorageError {
        match error.kind() {
            ErrorKind::StorageFull | ErrorKind::QuotaExceeded => StorageError::QuotaExceeded(
                format!("no space left to write {}", self.path.display()),
            ),
            _ => StorageError::Io(error),
        }
    }
}

#[async_trait]
impl Storage for LocalStore {
    async fn members(&self) -> Result<Vec<Member>, StorageError> {
        let mut members = self.members.read().await;
        members.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(members)
    }

    async fn add_member(&self, member: Member) -> Result<(), StorageError> {
        self.members.update(|items| items.push(member)).await
    }

    async fn delete_member(&self, id: &str) -> Result<(), StorageError> {
        self.members.update(|items| items.retain(|m| m.id != id)).await
    }

    async fn event_photos(&self) -> Result<Vec<EventPhoto>, StorageError> {
        let mut photos = self.photos.read().await;
        photos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(photos)
    }

    async fn add_event_photos(&self, photos: &[EventPhoto]) -> Result<(), StorageError> {
        self.photos
            .update(|items| items.extend_from_slice(photos))
            .await
    }
}
