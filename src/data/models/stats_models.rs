use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::data::models::ReviewOutcome;

/// Counters shared by the overall summary and each content-type bucket
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TypeStatistics {
    pub total_cards: usize,
    pub due_today: usize,
    pub overdue: usize,
    pub total_reviews: i64,
    pub correct_reviews: i64,
    pub accuracy: f64, // Percentage, 0-100
}

/// Summary returned by the statistics query
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReviewStatistics {
    pub user_id: String,
    pub total_cards: usize,
    pub due_today: usize,
    pub overdue: usize,
    pub total_reviews: i64,
    pub correct_reviews: i64,
    pub accuracy: f64,
    pub streak_days: u32,
    pub by_content_type: BTreeMap<String, TypeStatistics>,
}

/// Number of cards falling due on one calendar day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleDay {
    pub date: NaiveDate,
    pub due_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalPreview {
    pub outcome: ReviewOutcome,
    pub interval: i32,
}

/// Question/answer rendering of a card for the review screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewContent {
    pub card_id: String,
    pub content_type: String,
    pub question: String,
    pub answer: String,
    pub hints: Vec<String>,
    pub intervals: Vec<IntervalPreview>,
}
