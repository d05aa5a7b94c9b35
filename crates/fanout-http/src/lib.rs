pub mod client;
pub mod error;

// Re-exports
pub use client::ApiClient;
pub use error::{Error, Result};
