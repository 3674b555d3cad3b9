use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use validator::Validate;

use crate::{
    AppState,
    data::models::{ApiResponse, CreateCardRequest, ReviewCard, ReviewContent, ReviewRequest, SrsError},
    utils::{blocking, envelope, json_body},
};

pub async fn create_card(
    State(state): State<AppState>,
    payload: Result<Json<CreateCardRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ReviewCard>>, SrsError> {
    let request = json_body(payload)?;
    request.validate()?;

    let scheduler = state.scheduler.clone();
    let card = blocking(move || {
        scheduler.create_review_card(
            &request.user_id,
            &request.content_id,
            &request.content_type,
            &request.content_data,
        )
    })
    .await?;

    Ok(envelope(card))
}

pub async fn get_card(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
) -> Result<Json<ApiResponse<ReviewCard>>, SrsError> {
    let scheduler = state.scheduler.clone();
    let card = blocking(move || scheduler.get_card(&card_id)).await?;
    Ok(envelope(card))
}

pub async fn review_card(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ReviewCard>>, SrsError> {
    let request = json_body(payload)?;
    request.validate()?;

    let scheduler = state.scheduler.clone();
    let card = blocking(move || {
        scheduler.review_card(
            &card_id,
            request.outcome,
            request.response_time,
            request.difficulty_rating,
        )
    })
    .await?;

    Ok(envelope(card))
}

pub async fn get_review_content(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
) -> Result<Json<ApiResponse<ReviewContent>>, SrsError> {
    let scheduler = state.scheduler.clone();
    let content = blocking(move || scheduler.get_review_content(&card_id)).await?;
    Ok(envelope(content))
}
