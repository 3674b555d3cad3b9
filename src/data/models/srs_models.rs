use chrono::NaiveDateTime;
use diesel::{AsChangeset, Insertable, Queryable, Selectable};

use crate::data::models::{ContentData, ContentType, ReviewCard, SrsError};
use crate::schema::review_cards;

/// Represents a review card row in the SRS table
#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug)]
#[diesel(table_name = review_cards, primary_key(card_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ReviewCardRow {
    pub card_id: String,
    pub user_id: String,
    pub content_type: String,
    pub content_id: String,
    pub content_title: String,
    pub content_data: String, // JSON encoded ContentData
    pub easiness_factor: f64,
    pub interval_days: i32,
    pub repetitions: i32,
    pub next_review: NaiveDateTime,
    pub last_reviewed: Option<NaiveDateTime>,
    pub total_reviews: i32,
    pub correct_reviews: i32,
    pub average_response_time: f64,
    pub difficulty_rating: f64,
    pub created_at: NaiveDateTime,
}

impl TryFrom<&ReviewCard> for ReviewCardRow {
    type Error = SrsError;

    fn try_from(card: &ReviewCard) -> Result<Self, Self::Error> {
        Ok(Self {
            card_id: card.card_id.clone(),
            user_id: card.user_id.clone(),
            content_type: card.content_type.to_string(),
            content_id: card.content_id.clone(),
            content_title: card.content_title.clone(),
            content_data: serde_json::to_string(&card.content_data)?,
            easiness_factor: card.easiness_factor,
            interval_days: card.interval,
            repetitions: card.repetitions,
            next_review: card.next_review,
            last_reviewed: card.last_reviewed,
            total_reviews: card.total_reviews,
            correct_reviews: card.correct_reviews,
            average_response_time: card.average_response_time,
            difficulty_rating: card.difficulty_rating,
            created_at: card.created_at,
        })
    }
}

impl TryFrom<ReviewCardRow> for ReviewCard {
    type Error = SrsError;

    fn try_from(row: ReviewCardRow) -> Result<Self, Self::Error> {
        let content_data: ContentData = serde_json::from_str(&row.content_data)?;

        Ok(Self {
            card_id: row.card_id,
            user_id: row.user_id,
            content_id: row.content_id,
            content_type: ContentType::from(row.content_type),
            content_title: row.content_title,
            content_data,
            easiness_factor: row.easiness_factor,
            interval: row.interval_days,
            repetitions: row.repetitions,
            next_review: row.next_review,
            last_reviewed: row.last_reviewed,
            total_reviews: row.total_reviews,
            correct_reviews: row.correct_reviews,
            average_response_time: row.average_response_time,
            difficulty_rating: row.difficulty_rating,
            created_at: row.created_at,
        })
    }
}
