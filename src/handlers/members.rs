use super::result::APIResult;
use crate::{
    extensions::Handles,
    imaging,
    model::{epoch_millis, random_id, Member},
    status::Status,
};
use axum::{
    extract::{Extension, Path},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};

pub async fn list(Extension(handles): Extension<Handles>) -> APIResult {
    let members = handles.storage.members().await?;
    Ok(Status::ok_payload(members))
}

pub async fn register(
    Extension(handles): Extension<Handles>,
    Json(form): Json<Registration>,
) -> APIResult {
    tracing::info!("Registering member: {} ({})", &form.nome, &form.bloco);
    let foto = match form.foto.as_deref().filter(|uri| !uri.is_empty()) {
        Some(uri) => Some(imaging::normalize(uri)?),
        None => None,
    };
    let member = Member {
        id: random_id(),
        nome: form.nome,
        bloco: form.bloco,
        categoria: form.categoria,
        unidade: form.unidade,
        telefone: form.telefone,
        foto,
        created_at: epoch_millis(),
    };
    let response = Registered {
        id: member.id.clone(),
        created_at: member.created_at,
    };
    handles.storage.add_member(member).await?;
    tracing::trace!("Member stored with id {}", &response.id);
    Ok(Status::ok_payload(response))
}

pub async fn remove(
    Extension(handles): Extension<Handles>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> APIResult {
    super::authorize(&handles, &headers)?;
    tracing::info!("Deleting member {}", &id);
    handles.storage.delete_member(&id).await?;
    Ok(Status::ok())
}

#[derive(Deserialize)]
pub struct Registration {
    pub nome: String,
    pub bloco: String,
    pub categoria: String,
    pub unidade: String,
    pub telefone: String,
    /// Optional selfie as a data URI; empty string means no photo.
    #[serde(default)]
    pub foto: Option<String>,
}

#[derive(Serialize)]
struct Registered {
    id: String,
    #[serde(rename = "createdAt")]
    created_at: i64,
}
