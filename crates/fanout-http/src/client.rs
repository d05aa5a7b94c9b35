use crate::{Error, Result};
use async_trait::async_trait;
use fanout_core::RecordSource;
use reqwest::Client;
use serde_json::Value;

/// Fetches a JSON array of records from a single GET endpoint.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    url: String,
}

impl ApiClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// GET the endpoint and decode its body as an array of records
    pub async fn fetch_records(&self) -> Result<Vec<Value>> {
        tracing::info!("[API] Fetching data from {}...", self.url);

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let records = match serde_json::from_slice::<Value>(&bytes)? {
            Value::Array(items) => items,
            other => {
                return Err(Error::MalformedBody(format!(
                    "expected a JSON array, got {}",
                    json_kind(&other)
                )))
            }
        };

        tracing::info!("[API] Received {} records", records.len());

        Ok(records)
    }
}

#[async_trait]
impl RecordSource for ApiClient {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch_records(&self) -> fanout_core::Result<Vec<Value>> {
        ApiClient::fetch_records(self).await.map_err(Into::into)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
