use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use url::Url;

use crate::config::Config;
use crate::domain::{ApodRecord, DateRange};
use crate::errors::{ApodError, ApodResult};
use crate::sources::traits::RecordSource;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Client for an APOD API mirror (`/v1/apod/?start_date=..&end_date=..`).
pub struct ApodApiSource {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl ApodApiSource {
    pub fn new(endpoint: &str, api_key: Option<String>, timeout: Duration) -> ApodResult<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            endpoint: Url::parse(endpoint)?,
            api_key,
        })
    }

    pub fn from_config(config: &Config) -> ApodResult<Self> {
        Self::new(&config.api_url, config.api_key.clone(), config.timeout)
    }

    /// Build the request URL for one range
    fn request_url(&self, range: &DateRange) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            if let Some(key) = &self.api_key {
                query.append_pair("api_key", key);
            }
            query
                .append_pair("start_date", &range.start().format(DATE_FORMAT).to_string())
                .append_pair("end_date", &range.end().format(DATE_FORMAT).to_string());
        }
        url
    }

    /// Turn a response body into records, dropping elements that fail validation
    fn parse_records(body: &str) -> ApodResult<Vec<ApodRecord>> {
        let items = match serde_json::from_str::<Value>(body)? {
            Value::Array(items) => items,
            // Single-day queries on some mirrors answer with a bare object
            object @ Value::Object(_) => vec![object],
            other => {
                return Err(ApodError::UnexpectedPayload(format!(
                    "expected a JSON array of records, got: {}",
                    truncate(&other.to_string(), 80)
                )))
            }
        };

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match ApodRecord::from_value(item) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(index, error = %e, "Skipping malformed record"),
            }
        }

        Ok(records)
    }
}

impl RecordSource for ApodApiSource {
    fn fetch_range(&self, range: &DateRange) -> ApodResult<Vec<ApodRecord>> {
        let url = self.request_url(range);
        tracing::debug!(%url, "Requesting records");

        let body = self.client.get(url).send()?.error_for_status()?.text()?;
        let records = Self::parse_records(&body)?;

        tracing::debug!(range = %range, count = records.len(), "Received records");
        Ok(records)
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars).collect();
    out.push_str("...");
    out
}
