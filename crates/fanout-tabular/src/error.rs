use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("No header row in {0}")]
    MissingHeader(PathBuf),
}

impl Error {
    pub fn path(&self) -> &PathBuf {
        match self {
            Error::Io { path, .. } | Error::Csv { path, .. } | Error::MissingHeader(path) => path,
        }
    }
}

impl From<Error> for fanout_core::Error {
    fn from(err: Error) -> Self {
        fanout_core::Error::source_read(err.path().display().to_string(), &err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
