pub mod cards;

pub use cards::{create_card, get_card, get_review_content, review_card};
