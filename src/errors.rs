use deadpool_diesel::InteractError;
use deadpool_diesel::postgres::PoolError;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Malformed deadline specification (bad JSON or an unparsable date
    /// token). Fatal to the caller, never defaulted to "no deadline".
    #[error("Invalid deadline specification: {0}")]
    DeadlineFormat(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Database pool error: {0}")]
    Pool(#[source] PoolError),

    #[error("Database interaction error: {0}")]
    Interact(InteractError),

    #[error("Database query error: {0}")]
    Database(#[source] diesel::result::Error),
}

impl From<PoolError> for StoreError {
    fn from(err: PoolError) -> Self {
        error!("Database pool error encountered: {:?}", err);
        StoreError::Pool(err)
    }
}

impl From<InteractError> for StoreError {
    fn from(err: InteractError) -> Self {
        error!("Database interaction error encountered: {:?}", err);
        StoreError::Interact(err)
    }
}

impl From<diesel::result::Error> for StoreError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => {
                StoreError::NotFound("Resource not found (database query)".to_string())
            }
            _ => {
                error!("Unhandled Diesel error encountered: {:?}", err);
                StoreError::Database(err)
            }
        }
    }
}
