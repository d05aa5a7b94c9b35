use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response body: {0}")]
    MalformedBody(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<Error> for fanout_core::Error {
    fn from(err: Error) -> Self {
        fanout_core::Error::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
