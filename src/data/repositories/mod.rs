pub mod card;
pub mod memory;

pub use card::{DbPool, SqliteCardRepository, connect};
pub use memory::InMemoryCardRepository;

use crate::data::models::{ReviewCard, SrsResult};

/// Storage seam for review cards
///
/// `put` replaces the whole record. Callers serialise writes per card id,
/// so implementations only need to make a single `put` atomic.
pub trait CardRepository: Send + Sync {
    fn get(&self, card_id: &str) -> SrsResult<Option<ReviewCard>>;

    fn put(&self, card: &ReviewCard) -> SrsResult<()>;

    fn query_by_user(&self, user_id: &str) -> SrsResult<Vec<ReviewCard>>;
}
