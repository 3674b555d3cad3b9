use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, HashSet};

use crate::data::models::{ReviewCard, ReviewStatistics, ScheduleDay, TypeStatistics};

pub const MAX_SCHEDULE_DAYS: u32 = 90;

fn percentage(correct: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = correct as f64 / total as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}

fn tally(bucket: &mut TypeStatistics, card: &ReviewCard, now: NaiveDateTime) {
    bucket.total_cards += 1;
    if card.next_review.date() == now.date() {
        bucket.due_today += 1;
    }
    if card.next_review < now {
        bucket.overdue += 1;
    }
    bucket.total_reviews += card.total_reviews as i64;
    bucket.correct_reviews += card.correct_reviews as i64;
}

/// Consecutive days with at least one review, walking back from today
pub fn streak_days(cards: &[ReviewCard], today: NaiveDate) -> u32 {
    let reviewed: HashSet<NaiveDate> = cards
        .iter()
        .filter_map(|card| card.last_reviewed.map(|at| at.date()))
        .collect();

    let mut streak = 0;
    let mut day = today;
    while reviewed.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }
    streak
}

pub fn summarize(user_id: &str, cards: &[ReviewCard], now: NaiveDateTime) -> ReviewStatistics {
    let mut overall = TypeStatistics::default();
    let mut by_content_type: BTreeMap<String, TypeStatistics> = BTreeMap::new();

    for card in cards {
        tally(&mut overall, card, now);
        tally(
            by_content_type
                .entry(card.content_type.to_string())
                .or_default(),
            card,
            now,
        );
    }

    for bucket in by_content_type.values_mut() {
        bucket.accuracy = percentage(bucket.correct_reviews, bucket.total_reviews);
    }

    ReviewStatistics {
        user_id: user_id.to_string(),
        total_cards: overall.total_cards,
        due_today: overall.due_today,
        overdue: overall.overdue,
        total_reviews: overall.total_reviews,
        correct_reviews: overall.correct_reviews,
        accuracy: percentage(overall.correct_reviews, overall.total_reviews),
        streak_days: streak_days(cards, now.date()),
        by_content_type,
    }
}

/// Due-card counts for today and the following days; anything already
/// overdue is counted on today
pub fn upcoming_schedule(cards: &[ReviewCard], now: NaiveDateTime, days: u32) -> Vec<ScheduleDay> {
    let days = days.clamp(1, MAX_SCHEDULE_DAYS);
    let today = now.date();

    (0..days as i64)
        .map(|offset| {
            let date = today + Duration::days(offset);
            let due_count = cards
                .iter()
                .filter(|card| {
                    let due = card.next_review.date();
                    due == date || (offset == 0 && due < today)
                })
                .count();
            ScheduleDay { date, due_count }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::{ContentData, ContentType};
    use serde_json::json;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 11, 20)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap()
    }

    fn card(content_type: ContentType, content_id: &str) -> ReviewCard {
        let data = ContentData::from_payload(&content_type, &json!({"title": content_id})).unwrap();
        ReviewCard::new("u1", content_id, content_type, data, now() - Duration::days(30))
    }

    #[test]
    fn test_empty_user_gets_zeroed_summary() {
        let stats = summarize("nobody", &[], now());
        assert_eq!(stats.total_cards, 0);
        assert_eq!(stats.accuracy, 0.0);
        assert_eq!(stats.streak_days, 0);
        assert!(stats.by_content_type.is_empty());
    }

    #[test]
    fn test_summary_counts_and_breakdown() {
        let mut overdue = card(ContentType::Concept, "a");
        overdue.next_review = now() - Duration::days(2);
        overdue.total_reviews = 4;
        overdue.correct_reviews = 3;

        let mut later_today = card(ContentType::Concept, "b");
        later_today.next_review = now() + Duration::hours(3);
        later_today.total_reviews = 2;
        later_today.correct_reviews = 0;

        let mut earlier_today = card(ContentType::Quote, "c");
        earlier_today.next_review = now() - Duration::hours(1);

        let mut future = card(ContentType::Quote, "d");
        future.next_review = now() + Duration::days(5);

        let stats = summarize("u1", &[overdue, later_today, earlier_today, future], now());

        assert_eq!(stats.total_cards, 4);
        assert_eq!(stats.due_today, 2);
        assert_eq!(stats.overdue, 2);
        assert_eq!(stats.total_reviews, 6);
        assert_eq!(stats.correct_reviews, 3);
        assert_eq!(stats.accuracy, 50.0);

        let concept = &stats.by_content_type["concept"];
        assert_eq!(concept.total_cards, 2);
        assert_eq!(concept.accuracy, 50.0);
        let quote = &stats.by_content_type["quote"];
        assert_eq!(quote.total_cards, 2);
        assert_eq!(quote.overdue, 1);
        assert_eq!(quote.accuracy, 0.0);
    }

    #[test]
    fn test_streak_stops_at_first_gap() {
        let today = now();
        let reviewed_on = |days_ago: i64| {
            let mut c = card(ContentType::General, &format!("g{}", days_ago));
            c.last_reviewed = Some(today - Duration::days(days_ago));
            c
        };

        let cards = vec![reviewed_on(0), reviewed_on(1), reviewed_on(2), reviewed_on(4)];
        assert_eq!(streak_days(&cards, today.date()), 3);

        let missing_today = vec![reviewed_on(1), reviewed_on(2)];
        assert_eq!(streak_days(&missing_today, today.date()), 0);
    }

    #[test]
    fn test_schedule_buckets_overdue_into_today() {
        let mut overdue = card(ContentType::Concept, "a");
        overdue.next_review = now() - Duration::days(3);
        let mut tomorrow = card(ContentType::Concept, "b");
        tomorrow.next_review = now() + Duration::days(1);
        let mut far = card(ContentType::Concept, "c");
        far.next_review = now() + Duration::days(40);

        let schedule = upcoming_schedule(&[overdue, tomorrow, far], now(), 7);
        assert_eq!(schedule.len(), 7);
        assert_eq!(schedule[0].date, now().date());
        assert_eq!(schedule[0].due_count, 1);
        assert_eq!(schedule[1].due_count, 1);
        assert_eq!(schedule.iter().map(|d| d.due_count).sum::<usize>(), 2);

        assert_eq!(upcoming_schedule(&[], now(), 0).len(), 1);
        assert_eq!(upcoming_schedule(&[], now(), 500).len(), MAX_SCHEDULE_DAYS as usize);
    }
}
