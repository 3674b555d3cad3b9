pub mod users;

pub use users::{due_cards, statistics, upcoming_schedule};
