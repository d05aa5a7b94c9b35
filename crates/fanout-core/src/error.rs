use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Source read error ({path}): {message}")]
    SourceRead { path: String, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Task join error: {0}")]
    TaskJoin(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn source_read(path: impl Into<String>, message: impl ToString) -> Self {
        Self::SourceRead {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    pub fn is_database(&self) -> bool {
        matches!(self, Self::Database(_))
    }

    pub fn is_source_read(&self) -> bool {
        matches!(self, Self::SourceRead { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
