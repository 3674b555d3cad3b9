use chrono::Duration;
use std::sync::Arc;

use crate::data::models::{
    ContentData, ContentType, ReviewCard, ReviewContent, ReviewOutcome, ReviewStatistics,
    ScheduleDay, SrsError, SrsResult,
};
use crate::data::repositories::CardRepository;
use crate::features::srs::algorithm::{
    apply_outcome, clamp_interval, personalize_interval, priority, update_response_average,
};
use crate::features::srs::clock::{Clock, SystemClock};
use crate::features::srs::content::render_review_content;
use crate::features::srs::locks::CardLocks;
use crate::features::srs::statistics;

pub const DEFAULT_MAX_DUE_LIMIT: usize = 200;

/// Review card store plus the scheduling rules applied to it
pub struct Scheduler {
    repository: Arc<dyn CardRepository>,
    clock: Arc<dyn Clock>,
    locks: CardLocks,
    max_due_limit: usize,
}

fn required<'a>(name: &str, value: &'a str) -> SrsResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SrsError::InvalidArgument(format!("{} must not be empty", name)));
    }
    Ok(trimmed)
}

impl Scheduler {
    pub fn new(repository: Arc<dyn CardRepository>) -> Self {
        Self::with_clock(repository, Arc::new(SystemClock))
    }

    pub fn with_clock(repository: Arc<dyn CardRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            clock,
            locks: CardLocks::default(),
            max_due_limit: DEFAULT_MAX_DUE_LIMIT,
        }
    }

    pub fn with_max_due_limit(mut self, max_due_limit: usize) -> Self {
        self.max_due_limit = max_due_limit.max(1);
        self
    }

    /// Creates the card for (user, content), or returns the existing one untouched
    pub fn create_review_card(
        &self,
        user_id: &str,
        content_id: &str,
        content_type: &str,
        content_data: &serde_json::Value,
    ) -> SrsResult<ReviewCard> {
        let user_id = required("user_id", user_id)?;
        let content_id = required("content_id", content_id)?;
        let content_type = ContentType::from(content_type.trim().to_ascii_lowercase());
        let card_id = ReviewCard::card_id_for(user_id, &content_type, content_id);

        let lock = self.locks.for_card(&card_id)?;
        let _guard = lock.lock()?;

        if let Some(existing) = self.repository.get(&card_id)? {
            log::debug!("Card {} already exists, keeping its progress", card_id);
            return Ok(existing);
        }

        let data = ContentData::from_payload(&content_type, content_data)?;
        let card = ReviewCard::new(user_id, content_id, content_type, data, self.clock.now());
        self.repository.put(&card)?;

        log::info!("Created review card {}", card.card_id);
        Ok(card)
    }

    pub fn get_card(&self, card_id: &str) -> SrsResult<ReviewCard> {
        self.repository
            .get(card_id)?
            .ok_or_else(|| SrsError::NotFound(card_id.to_string()))
    }

    /// Records one review and reschedules the card
    pub fn review_card(
        &self,
        card_id: &str,
        outcome: ReviewOutcome,
        response_time: Option<f64>,
        difficulty_rating: Option<f64>,
    ) -> SrsResult<ReviewCard> {
        if let Some(t) = response_time {
            if !t.is_finite() || t < 0.0 {
                return Err(SrsError::InvalidArgument(
                    "response_time must be a non-negative number of seconds".into(),
                ));
            }
        }
        if let Some(d) = difficulty_rating {
            if !(0.0..=1.0).contains(&d) {
                return Err(SrsError::InvalidArgument(
                    "difficulty_rating must be within [0, 1]".into(),
                ));
            }
        }

        // Unknown ids never reach the lock table; cards are never deleted
        self.get_card(card_id)?;

        let lock = self.locks.for_card(card_id)?;
        let _guard = lock.lock()?;

        let mut card = self.get_card(card_id)?;
        let now = self.clock.now();

        card.last_reviewed = Some(now);
        card.total_reviews += 1;
        if outcome.is_correct() {
            card.correct_reviews += 1;
        }
        if let Some(t) = response_time {
            card.average_response_time = update_response_average(card.average_response_time, t);
        }
        if let Some(d) = difficulty_rating {
            card.difficulty_rating = d;
        }

        let next = apply_outcome(card.scheduling_state(), outcome);
        card.repetitions = next.repetitions;
        card.easiness_factor = next.easiness_factor;
        card.interval = clamp_interval(personalize_interval(next.interval, &card));
        card.next_review = now + Duration::days(card.interval as i64);

        self.repository.put(&card)?;

        log::debug!(
            "Reviewed card {} as {:?}: interval {}d, ef {:.2}, repetitions {}",
            card.card_id,
            outcome,
            card.interval,
            card.easiness_factor,
            card.repetitions
        );
        Ok(card)
    }

    /// Due cards for a user, highest priority first
    pub fn get_due_cards(&self, user_id: &str, limit: usize) -> SrsResult<Vec<ReviewCard>> {
        let now = self.clock.now();
        let limit = limit.min(self.max_due_limit);

        let mut due: Vec<(f64, ReviewCard)> = self
            .repository
            .query_by_user(user_id)?
            .into_iter()
            .filter(|card| card.user_id == user_id && card.is_due(now))
            .map(|card| (priority(&card, now), card))
            .collect();

        due.sort_by(|a, b| {
            b.0.total_cmp(&a.0)
                .then_with(|| a.1.next_review.cmp(&b.1.next_review))
        });

        Ok(due.into_iter().take(limit).map(|(_, card)| card).collect())
    }

    pub fn get_review_statistics(&self, user_id: &str) -> SrsResult<ReviewStatistics> {
        let cards = self.repository.query_by_user(user_id)?;
        Ok(statistics::summarize(user_id, &cards, self.clock.now()))
    }

    pub fn get_upcoming_schedule(&self, user_id: &str, days: u32) -> SrsResult<Vec<ScheduleDay>> {
        let cards = self.repository.query_by_user(user_id)?;
        Ok(statistics::upcoming_schedule(&cards, self.clock.now(), days))
    }

    pub fn get_review_content(&self, card_id: &str) -> SrsResult<ReviewContent> {
        let card = self.get_card(card_id)?;
        Ok(render_review_content(&card))
    }
}
