use std::collections::HashMap;
use std::sync::RwLock;

use crate::data::models::{ReviewCard, SrsError, SrsResult};
use crate::data::repositories::CardRepository;

/// Process-local card store, lost on restart
#[derive(Default)]
pub struct InMemoryCardRepository {
    cards: RwLock<HashMap<String, ReviewCard>>,
}

impl InMemoryCardRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> SrsError {
    SrsError::LockPoisoned("in-memory card store".into())
}

impl CardRepository for InMemoryCardRepository {
    fn get(&self, card_id: &str) -> SrsResult<Option<ReviewCard>> {
        let cards = self.cards.read().map_err(poisoned)?;
        Ok(cards.get(card_id).cloned())
    }

    fn put(&self, card: &ReviewCard) -> SrsResult<()> {
        let mut cards = self.cards.write().map_err(poisoned)?;
        cards.insert(card.card_id.clone(), card.clone());
        Ok(())
    }

    fn query_by_user(&self, user_id: &str) -> SrsResult<Vec<ReviewCard>> {
        let cards = self.cards.read().map_err(poisoned)?;
        Ok(cards
            .values()
            .filter(|card| card.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::{ContentData, ContentType};
    use chrono::NaiveDate;
    use serde_json::json;

    fn card(user_id: &str, content_id: &str) -> ReviewCard {
        let now = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let data = ContentData::from_payload(&ContentType::Concept, &json!({"title": "道"})).unwrap();
        ReviewCard::new(user_id, content_id, ContentType::Concept, data, now)
    }

    #[test]
    fn test_put_replaces_and_query_filters_by_user() {
        let repo = InMemoryCardRepository::new();
        let mut first = card("alice", "c1");
        repo.put(&first).unwrap();
        repo.put(&card("alice", "c2")).unwrap();
        repo.put(&card("bob", "c1")).unwrap();

        first.repetitions = 4;
        repo.put(&first).unwrap();

        let stored = repo.get(&first.card_id).unwrap().unwrap();
        assert_eq!(stored.repetitions, 4);
        assert_eq!(repo.query_by_user("alice").unwrap().len(), 2);
        assert_eq!(repo.query_by_user("bob").unwrap().len(), 1);
        assert!(repo.query_by_user("carol").unwrap().is_empty());
        assert!(repo.get("missing").unwrap().is_none());
    }
}
