use thiserror::Error;

use shared_models::error::AppError;

#[derive(Error, Debug)]
pub enum AvailabilityError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Service not found: {0}")]
    ServiceNotFound(String),

    #[error("Upstream data error: {0:#}")]
    Upstream(#[from] anyhow::Error),
}

impl From<AvailabilityError> for AppError {
    fn from(err: AvailabilityError) -> Self {
        match err {
            AvailabilityError::InvalidRequest(_) => AppError::BadRequest(err.to_string()),
            AvailabilityError::ServiceNotFound(_) => AppError::NotFound(err.to_string()),
            AvailabilityError::Upstream(_) => AppError::Database(err.to_string()),
        }
    }
}
