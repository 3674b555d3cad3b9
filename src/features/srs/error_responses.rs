use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::data::models::{ApiResponse, SrsError};

impl SrsError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SrsError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            SrsError::NotFound(_) => StatusCode::NOT_FOUND,
            SrsError::DatabaseError(_)
            | SrsError::PoolError(_)
            | SrsError::SerializationError(_)
            | SrsError::LockPoisoned(_)
            | SrsError::TaskFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SrsError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            SrsError::InvalidArgument(_) | SrsError::NotFound(_) => self.to_string(),
            SrsError::DatabaseError(ref e) => {
                log::error!("Database error: {}", e);
                "Internal server error".to_string()
            }
            SrsError::SerializationError(ref e) => {
                log::error!("Serialization error: {}", e);
                "Internal server error".to_string()
            }
            SrsError::PoolError(_) | SrsError::LockPoisoned(_) | SrsError::TaskFailed(_) => {
                log::error!("{}", self);
                "Internal server error".to_string()
            }
        };

        (status, axum::Json(ApiResponse::<()>::failure(message))).into_response()
    }
}
