use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Decode error in column {column}: {message}")]
    Decode { column: String, message: String },

    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl From<Error> for fanout_core::Error {
    fn from(err: Error) -> Self {
        fanout_core::Error::Database(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
