use axum::Json;
use axum::extract::Query;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use serde::Serialize;

use crate::data::models::{ApiResponse, SrsError, SrsResult};

pub fn envelope<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::ok(data))
}

/// Turns axum's plain-text body rejection into an enveloped 400
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> SrsResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| SrsError::InvalidArgument(rejection.body_text()))
}

/// Same as `json_body`, for query strings
pub fn query_params<T>(params: Result<Query<T>, QueryRejection>) -> SrsResult<T> {
    params
        .map(|Query(params)| params)
        .map_err(|rejection| SrsError::InvalidArgument(rejection.body_text()))
}

/// Runs scheduler work off the async executor; storage calls block
pub async fn blocking<T, F>(work: F) -> SrsResult<T>
where
    F: FnOnce() -> SrsResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| SrsError::TaskFailed(e.to_string()))?
}
