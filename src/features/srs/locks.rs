use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::data::models::{SrsError, SrsResult};

/// One mutex per card id, so two reviews of the same card never interleave
/// while unrelated cards proceed in parallel. Entries live only while some
/// caller holds a `CardLock` for that id.
#[derive(Default)]
pub struct CardLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

/// Handle on one card's mutex; removes the table entry when the last handle drops
pub struct CardLock<'a> {
    table: &'a CardLocks,
    card_id: String,
    mutex: Arc<Mutex<()>>,
}

impl CardLocks {
    pub fn for_card(&self, card_id: &str) -> SrsResult<CardLock<'_>> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| SrsError::LockPoisoned("card lock table".into()))?;

        let mutex = locks
            .entry(card_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        Ok(CardLock {
            table: self,
            card_id: card_id.to_string(),
            mutex,
        })
    }

    /// Number of card ids currently tracked
    pub fn len(&self) -> usize {
        self.locks.lock().map(|locks| locks.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CardLock<'_> {
    pub fn lock(&self) -> SrsResult<MutexGuard<'_, ()>> {
        self.mutex
            .lock()
            .map_err(|_| SrsError::LockPoisoned(self.card_id.clone()))
    }
}

impl Drop for CardLock<'_> {
    fn drop(&mut self) {
        // New handles are only cloned under the table lock, so the count is stable here
        if let Ok(mut locks) = self.table.locks.lock() {
            if Arc::strong_count(&self.mutex) == 2 {
                locks.remove(&self.card_id);
            }
        }
    }
}
