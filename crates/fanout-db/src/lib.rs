pub mod decode;
pub mod error;
pub mod repository;

// Re-exports
pub use decode::decode_row;
pub use repository::Database;
pub use error::{Error, Result};
