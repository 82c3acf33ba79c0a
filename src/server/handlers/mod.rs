//! HTTP handlers for the server.

pub mod design;

use axum::http::StatusCode;

use crate::error::SignboardError;

/// Map a library error to the status code it is reported with.
pub(crate) fn error_response(e: SignboardError) -> (StatusCode, String) {
    let status = match &e {
        SignboardError::Validation { .. }
        | SignboardError::InvalidDesign(_)
        | SignboardError::Json(_)
        | SignboardError::NoDesign => StatusCode::BAD_REQUEST,
        SignboardError::Busy(_) => StatusCode::CONFLICT,
        SignboardError::Collaborator(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string())
}
