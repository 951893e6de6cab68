use super::result::APIResult;
use crate::{
    extensions::Handles,
    imaging,
    model::EventPhoto,
    status::{Status, StatusKind},
};
use axum::{extract::Extension, Json};
use serde::{Deserialize, Serialize};

pub async fn list(Extension(handles): Extension<Handles>) -> APIResult {
    let photos = handles.storage.event_photos().await?;
    Ok(Status::ok_payload(photos))
}

/// Images are normalized and persisted one at a time; the first failure
/// aborts the remaining items and the response is one aggregate report.
pub async fn upload(
    Extension(handles): Extension<Handles>,
    Json(batch): Json<MuralUpload>,
) -> APIResult {
    let total = batch.fotos.len();
    tracing::info!("Mural upload of {} image(s)", total);
    let mut stored = Vec::new();
    for (index, uri) in batch.fotos.iter().enumerate() {
        let normalized = match imaging::normalize(uri) {
            Ok(normalized) => normalized,
            Err(error) => {
                return Ok(aborted(StatusKind::BadRequest, stored, index, total, error));
            }
        };
        let photo = EventPhoto::new(normalized);
        let id = photo.id.clone();
        if let Err(error) = handles
            .storage
            .add_event_photos(std::slice::from_ref(&photo))
            .await
        {
            return Ok(aborted(StatusKind::InternalError, stored, index, total, error));
        }
        stored.push(id);
    }
    tracing::trace!("Mural upload complete: {} stored", stored.len());
    Ok(Status::ok_payload(UploadReport {
        stored,
        failed_at: None,
        error: None,
    }))
}

fn aborted(
    kind: StatusKind,
    stored: Vec<String>,
    index: usize,
    total: usize,
    error: impl std::fmt::Display,
) -> Status {
    let error = error.to_string();
    tracing::warn!(
        "Mural upload aborted at item {} of {}: {}",
        index + 1,
        total,
        error
    );
    Status::new(
        kind,
        UploadReport {
            stored,
            failed_at: Some(index),
            error: Some(error),
        },
    )
}

#[derive(Deserialize)]
pub struct MuralUpload {
    pub fotos: Vec<String>,
}

#[derive(Serialize)]
struct UploadReport {
    /// Ids persisted before the batch stopped, in upload order.
    stored: Vec<String>,
    failed_at: Option<usize>,
    error: Option<String>,
}
