pub mod error;
pub mod loader;

// Re-exports
pub use error::{Error, Result};
pub use loader::{load_csv, parse_csv};
