use chrono::{NaiveDateTime, Utc};

/// Source of "now" for scheduling decisions, in naive UTC
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}
