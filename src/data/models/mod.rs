pub mod api_models;
pub mod error_models;
pub mod review_models;
pub mod srs_models;
pub mod stats_models;

pub use api_models::{ApiResponse, CreateCardRequest, DueCardsParams, ReviewRequest, ScheduleParams};
pub use error_models::{SrsError, SrsResult};
pub use review_models::{
    ContentData, ContentType, ReviewCard, ReviewOutcome, SchedulingState,
    INITIAL_EASINESS, INITIAL_INTERVAL,
};
pub use srs_models::ReviewCardRow;
pub use stats_models::{IntervalPreview, ReviewContent, ReviewStatistics, ScheduleDay, TypeStatistics};
