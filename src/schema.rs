// Mirrors migrations/schema.sql

diesel::table! {
    review_cards (card_id) {
        card_id -> Text,
        user_id -> Text,
        content_type -> Text,
        content_id -> Text,
        content_title -> Text,
        content_data -> Text,
        easiness_factor -> Double,
        interval_days -> Integer,
        repetitions -> Integer,
        next_review -> Timestamp,
        last_reviewed -> Nullable<Timestamp>,
        total_reviews -> Integer,
        correct_reviews -> Integer,
        average_response_time -> Double,
        difficulty_rating -> Double,
        created_at -> Timestamp,
    }
}
