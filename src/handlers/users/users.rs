use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};

use crate::{
    AppState,
    data::models::{
        ApiResponse, DueCardsParams, ReviewCard, ReviewStatistics, ScheduleDay, ScheduleParams,
        SrsError,
    },
    utils::{blocking, envelope, query_params},
};

const DEFAULT_DUE_LIMIT: usize = 20;
const DEFAULT_SCHEDULE_DAYS: u32 = 7;

pub async fn due_cards(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    params: Result<Query<DueCardsParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<ReviewCard>>>, SrsError> {
    let params = query_params(params)?;
    let limit = params.limit.unwrap_or(DEFAULT_DUE_LIMIT);
    let scheduler = state.scheduler.clone();
    let cards = blocking(move || scheduler.get_due_cards(&user_id, limit)).await?;
    Ok(envelope(cards))
}

pub async fn statistics(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<ReviewStatistics>>, SrsError> {
    let scheduler = state.scheduler.clone();
    let stats = blocking(move || scheduler.get_review_statistics(&user_id)).await?;
    Ok(envelope(stats))
}

pub async fn upcoming_schedule(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    params: Result<Query<ScheduleParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<ScheduleDay>>>, SrsError> {
    let params = query_params(params)?;
    let days = params.days.unwrap_or(DEFAULT_SCHEDULE_DAYS);
    let scheduler = state.scheduler.clone();
    let schedule = blocking(move || scheduler.get_upcoming_schedule(&user_id, days)).await?;
    Ok(envelope(schedule))
}
