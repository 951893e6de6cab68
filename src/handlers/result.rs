use crate::{
    imaging::ImageError,
    status::{Status, StatusKind},
    storage::StorageError,
};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub type APIResult = Result<Status, APIError>;

#[derive(Debug, Error)]
pub enum APIError {
    #[error("{0}")]
    Storage(#[from] StorageError),
    #[error("{0}")]
    Image(#[from] ImageError),
    #[error("access code rejected")]
    Forbidden,
}

impl Into<Status> for APIError {
    fn into(self) -> Status {
        let msg = format!("{}", self);
        let kind = match self {
            Self::Image(_) => StatusKind::BadRequest,
            Self::Forbidden => StatusKind::Forbidden,
            Self::Storage(_) => StatusKind::InternalError,
        };
        Status::new(kind, msg)
    }
}

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        let status: Status = self.into();
        status.into_response()
    }
}
