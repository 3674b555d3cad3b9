use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::data::models::ReviewOutcome;

/// Standard API envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Request payload for creating a review card
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCardRequest {
    #[validate(length(min = 1, message = "user_id must not be empty"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "content_id must not be empty"))]
    pub content_id: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
    pub content_data: serde_json::Value, // Catalog record, must carry a title
}

fn default_content_type() -> String {
    "general".to_string()
}

/// Request payload for submitting a review
#[derive(Debug, Deserialize, Validate)]
pub struct ReviewRequest {
    pub outcome: ReviewOutcome,
    #[validate(range(min = 0.0, message = "response_time must not be negative"))]
    pub response_time: Option<f64>,
    #[validate(range(min = 0.0, max = 1.0, message = "difficulty_rating must be within [0, 1]"))]
    pub difficulty_rating: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct DueCardsParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleParams {
    pub days: Option<u32>,
}
