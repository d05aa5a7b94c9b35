use crate::{Result, Row};
use async_trait::async_trait;

/// Remote endpoint yielding a JSON array of records.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Identifier used in task descriptors and logs (usually the URL)
    fn describe(&self) -> String;

    async fn fetch_records(&self) -> Result<Vec<serde_json::Value>>;
}

/// Relational source yielding row tuples.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Identifier used in task descriptors and logs (usually the query)
    fn describe(&self) -> String;

    async fn fetch_rows(&self) -> Result<Vec<Row>>;
}
