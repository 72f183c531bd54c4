use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} environment variable is not set")]
    MissingConfig(&'static str),
    #[error("the store did not report an id for the inserted record")]
    MissingId,
    #[error(transparent)]
    Sql(#[from] sqlx::Error),
}

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;
