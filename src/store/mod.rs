//! Read-only client for the remote highlights table.
//!
//! The table lives behind Supabase's PostgREST API. Everything else in the
//! crate talks to it through the [`HighlightStore`] trait so the orchestrator
//! and option deriver can be driven by other stores in tests.

pub mod query;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::constants::{FETCH_FAILED_MESSAGE, USER_AGENT};
use crate::filters::FilterColumns;
use crate::model::{validate_rows, Highlight};

pub use query::{Filter, HighlightQuery, Order};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request to store failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("store returned HTTP {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Api {
        status: u16,
        message: Option<String>,
    },
    #[error("failed to decode store response: {0}")]
    Decode(String),
    #[error("invalid store header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),
}

impl StoreError {
    /// Text suitable for the error banner.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::Api {
                message: Some(m), ..
            } if !m.trim().is_empty() => m.clone(),
            Self::Api { .. } => FETCH_FAILED_MESSAGE.to_string(),
            Self::Request(e) => e.to_string(),
            Self::Decode(m) => m.clone(),
            Self::Header(e) => e.to_string(),
        }
    }
}

/// Error body PostgREST sends with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Read access to highlight rows.
#[async_trait]
pub trait HighlightStore: Send + Sync {
    /// Unfiltered `game,tags` projection of every row.
    async fn fetch_filter_columns(&self) -> Result<Vec<FilterColumns>, StoreError>;

    /// Rows matching the query, in the order the store returns them.
    async fn fetch_highlights(&self, query: &HighlightQuery)
        -> Result<Vec<Highlight>, StoreError>;
}

/// Supabase (PostgREST) backed store.
#[derive(Clone)]
pub struct SupabaseStore {
    http: reqwest::Client,
    endpoint: String,
}

impl SupabaseStore {
    /// Create a store client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the anon key is not a valid header value or the
    /// HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let mut api_key = HeaderValue::from_str(&config.supabase_anon_key)?;
        api_key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.supabase_anon_key))?;
        bearer.set_sensitive(true);
        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        let endpoint = format!(
            "{}/rest/v1/{}",
            config.supabase_url.trim_end_matches('/'),
            config.highlights_table
        );

        Ok(Self { http, endpoint })
    }

    /// The table endpoint requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn select<T>(&self, query: &HighlightQuery) -> Result<Vec<T>, StoreError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let pairs = query.to_query_pairs();
        debug!(endpoint = %self.endpoint, query = ?pairs, "Querying highlights table");

        let response = self.http.get(&self.endpoint).query(&pairs).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[async_trait]
impl HighlightStore for SupabaseStore {
    async fn fetch_filter_columns(&self) -> Result<Vec<FilterColumns>, StoreError> {
        self.select(&HighlightQuery::filter_columns()).await
    }

    async fn fetch_highlights(
        &self,
        query: &HighlightQuery,
    ) -> Result<Vec<Highlight>, StoreError> {
        let rows: Vec<serde_json::Value> = self.select(query).await?;
        Ok(validate_rows(rows))
    }
}
