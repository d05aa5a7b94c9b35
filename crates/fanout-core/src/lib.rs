pub mod aggregate;
pub mod config;
pub mod error;
pub mod result;
pub mod source;
pub mod task;
pub mod task_group;

// Re-exports
pub use aggregate::{Aggregate, TabularResult};
pub use config::FetchConfig;
pub use error::{Error, Result};
pub use result::{Cell, ColumnType, ResultSet, Row, Table};
pub use source::{RecordSource, RowSource};
pub use task::{FetchTask, TaskKind};
pub use task_group::{TaskGroup, DEFAULT_MAX_WORKERS};
