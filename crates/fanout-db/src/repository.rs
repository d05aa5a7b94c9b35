use crate::{decode::decode_row, Error, Result};
use async_trait::async_trait;
use fanout_core::{Row, RowSource};
use sqlx::postgres::PgConnection;
use sqlx::Connection;

/// Runs one query against PostgreSQL over a dedicated connection.
#[derive(Clone)]
pub struct Database {
    database_url: String,
    query: String,
}

impl Database {
    pub fn new(database_url: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            query: query.into(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Connect, run the query, and return every row in result order.
    ///
    /// The connection is opened for this call only and closed before
    /// returning.
    pub async fn fetch_rows(&self) -> Result<Vec<Row>> {
        tracing::info!("[DB] Querying PostgreSQL database...");

        let mut conn = PgConnection::connect(&self.database_url)
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let fetched = sqlx::query(&self.query).fetch_all(&mut conn).await;

        if let Err(e) = conn.close().await {
            tracing::warn!("Failed to close database connection: {}", e);
        }

        let records = fetched.map_err(|e| Error::Query(e.to_string()))?;
        let rows = records.iter().map(decode_row).collect::<Result<Vec<_>>>()?;

        tracing::info!("[DB] Retrieved {} records", rows.len());

        Ok(rows)
    }
}

#[async_trait]
impl RowSource for Database {
    fn describe(&self) -> String {
        self.query.clone()
    }

    async fn fetch_rows(&self) -> fanout_core::Result<Vec<Row>> {
        Database::fetch_rows(self).await.map_err(Into::into)
    }
}
