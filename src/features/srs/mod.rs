pub mod algorithm;
pub mod clock;
pub mod content;
pub mod error_conversions;
pub mod error_responses;
pub mod locks;
pub mod scheduler;
pub mod statistics;

pub use clock::{Clock, SystemClock};
pub use scheduler::{Scheduler, DEFAULT_MAX_DUE_LIMIT};
