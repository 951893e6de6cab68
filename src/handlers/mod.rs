pub mod members;
pub mod photos;
pub mod result;
pub mod roster;

use crate::extensions::Handles;
use axum::http::HeaderMap;
use self::result::APIError;

/// Header carrying the roster access code for privileged actions.
pub const ACCESS_CODE_HEADER: &str = "x-codigo-acesso";

fn authorize(handles: &Handles, headers: &HeaderMap) -> Result<(), APIError> {
    let presented = headers
        .get(ACCESS_CODE_HEADER)
        .and_then(|value| value.to_str().ok());
    if presented == Some(handles.roster.access_code.as_str()) {
        Ok(())
    } else {
        Err(APIError::Forbidden)
    }
}
