use diesel::r2d2::PoolError;
use validator::ValidationErrors;

use crate::data::models::SrsError;

impl From<PoolError> for SrsError {
    fn from(err: PoolError) -> Self {
        SrsError::PoolError(err.to_string())
    }
}

impl From<ValidationErrors> for SrsError {
    fn from(err: ValidationErrors) -> Self {
        SrsError::InvalidArgument(err.to_string())
    }
}
