//! SuperMemo-2 style scheduling rules
//!
//! Everything in here is pure arithmetic over a card snapshot, so the
//! scheduler can apply it under a lock and tests can drive it directly.

use chrono::NaiveDateTime;

use crate::data::models::{ReviewCard, ReviewOutcome, SchedulingState};

pub const MIN_EASINESS: f64 = 1.3;
pub const MAX_EASINESS: f64 = 2.5;
pub const MIN_INTERVAL: i32 = 1;
pub const MAX_INTERVAL: i32 = 365;

pub fn clamp_easiness(ef: f64) -> f64 {
    ef.clamp(MIN_EASINESS, MAX_EASINESS)
}

pub fn clamp_interval(interval: i32) -> i32 {
    interval.clamp(MIN_INTERVAL, MAX_INTERVAL)
}

fn scaled(interval: i32, factor: f64) -> i32 {
    (interval as f64 * factor).round() as i32
}

/// Applies the interval update table for one review outcome.
///
/// Interval growth uses the easiness factor from before the review.
pub fn apply_outcome(state: SchedulingState, outcome: ReviewOutcome) -> SchedulingState {
    let ef = state.easiness_factor;

    match outcome {
        ReviewOutcome::Again => SchedulingState {
            easiness_factor: clamp_easiness(ef - 0.2),
            interval: 1,
            repetitions: 0,
        },
        ReviewOutcome::Hard => SchedulingState {
            easiness_factor: clamp_easiness(ef - 0.15),
            interval: scaled(state.interval, 1.2).max(1),
            repetitions: state.repetitions + 1,
        },
        ReviewOutcome::Good => {
            let repetitions = state.repetitions + 1;
            let interval = match repetitions {
                1 => 1,
                2 => 6,
                _ => scaled(state.interval, ef),
            };
            SchedulingState {
                easiness_factor: clamp_easiness(ef),
                interval,
                repetitions,
            }
        }
        ReviewOutcome::Easy => {
            let repetitions = state.repetitions + 1;
            let interval = match repetitions {
                1 => 4,
                2 => 10,
                _ => scaled(state.interval, ef * 1.3),
            };
            SchedulingState {
                easiness_factor: clamp_easiness(ef + 0.1),
                interval,
                repetitions,
            }
        }
    }
}

/// Stretches or shrinks an interval according to the learner's history with the card.
pub fn personalize_interval(interval: i32, card: &ReviewCard) -> i32 {
    let mut adjusted = interval as f64;

    if card.total_reviews > 0 {
        let accuracy = card.accuracy();
        if accuracy < 0.6 {
            adjusted *= 0.8;
        } else if accuracy > 0.9 {
            adjusted *= 1.2;
        }
    }

    // 0 means no response time has been recorded yet
    if card.average_response_time > 0.0 {
        if card.average_response_time > 10.0 {
            adjusted *= 0.9;
        } else if card.average_response_time < 3.0 {
            adjusted *= 1.1;
        }
    }

    if card.difficulty_rating > 0.7 {
        adjusted *= 0.8;
    } else if card.difficulty_rating < 0.3 {
        adjusted *= 1.2;
    }

    (adjusted as i32).max(MIN_INTERVAL)
}

pub fn update_response_average(average: f64, response_time: f64) -> f64 {
    if average == 0.0 {
        response_time
    } else {
        (average + response_time) / 2.0
    }
}

/// Whole days the card is past due, 0 when not yet due
pub fn overdue_days(card: &ReviewCard, now: NaiveDateTime) -> i64 {
    (now - card.next_review).num_days().max(0)
}

/// Ranking score for due cards; larger means review sooner
pub fn priority(card: &ReviewCard, now: NaiveDateTime) -> f64 {
    overdue_days(card, now) as f64 * 10.0
        + card.difficulty_rating * 5.0
        + (1.0 - card.accuracy()) * 10.0
        + card.content_type.priority_bonus()
}

/// Interval every outcome would produce if the card were reviewed now,
/// ignoring optional response-time and difficulty inputs
pub fn preview_intervals(card: &ReviewCard) -> [(ReviewOutcome, i32); 4] {
    ReviewOutcome::ALL.map(|outcome| {
        let mut projected = card.clone();
        projected.total_reviews += 1;
        if outcome.is_correct() {
            projected.correct_reviews += 1;
        }
        let next = apply_outcome(card.scheduling_state(), outcome);
        (outcome, clamp_interval(personalize_interval(next.interval, &projected)))
    })
}
