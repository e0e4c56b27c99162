//! HTTP client for the product search endpoint.

use std::time::Duration;

use reqwest::{Client, Url};
use upsell_core::{AppConfig, CatalogItem, ConfigError, API_KEY_VAR};

use crate::error::CatalogError;
use crate::retry::retry_with_backoff;

/// Header carrying the catalog API key.
const API_KEY_HEADER: &str = "x-api-key";

/// Error bodies longer than this are cut before they land in the store.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Client for the remote product catalog.
///
/// Issues `GET {base_url}?search=<term>` with the API key in the `x-api-key`
/// header. Non-2xx responses become typed errors; transient ones are retried
/// with back-off when `max_retries > 0`.
pub struct CatalogClient {
    client: Client,
    base_url: Url,
    api_key: String,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay for exponential back-off: `backoff_base_ms * 2^(attempt-1)`.
    backoff_base_ms: u64,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[redacted]")
            .field("max_retries", &self.max_retries)
            .field("backoff_base_ms", &self.backoff_base_ms)
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Creates a client with retries disabled.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`CatalogError::Http`] if the underlying `reqwest::Client` cannot be
    /// constructed.
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, CatalogError> {
        let base_url = Url::parse(base_url).map_err(|e| CatalogError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot carry a query".to_owned(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_owned(),
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Enables retries on transient failures.
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Builds a client from the `UPSELL_CATALOG_*` settings.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Config`] if no API key is configured, otherwise the
    /// same as [`CatalogClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        let api_key = config
            .catalog_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar(API_KEY_VAR.to_string()))?;
        Ok(Self::new(
            &config.catalog_url,
            api_key,
            config.catalog_timeout_secs,
            &config.catalog_user_agent,
        )?
        .with_retry(
            config.catalog_max_retries,
            config.catalog_retry_backoff_base_ms,
        ))
    }

    /// Searches the catalog. An empty `term` lists the default page.
    ///
    /// A `null` body is treated as "no results".
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Unauthorized`]: HTTP 401/403 (not retried).
    /// - [`CatalogError::RateLimited`]: HTTP 429 after all retries exhausted.
    /// - [`CatalogError::UnexpectedStatus`]: any other non-2xx status; the
    ///   error carries the (truncated) response body.
    /// - [`CatalogError::Http`]: network or TLS failure.
    /// - [`CatalogError::Deserialize`]: body is not a product array.
    pub async fn search_products(&self, term: &str) -> Result<Vec<CatalogItem>, CatalogError> {
        let url = self.search_url(term);
        tracing::debug!(term, "searching catalog");

        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(url.clone())
                    .header(API_KEY_HEADER, &self.api_key)
                    .header(reqwest::header::ACCEPT, "application/json")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::UNAUTHORIZED
                    || status == reqwest::StatusCode::FORBIDDEN
                {
                    return Err(CatalogError::Unauthorized {
                        status: status.as_u16(),
                    });
                }

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(CatalogError::RateLimited { retry_after_secs });
                }

                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    return Err(CatalogError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                        body: truncate_body(&body),
                    });
                }

                let body = response.text().await?;
                parse_search_body(&body, term)
            }
        })
        .await
    }

    /// Builds the search URL; `term` is query-encoded by `reqwest::Url`.
    fn search_url(&self, term: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("search", term);
        url
    }
}

fn parse_search_body(body: &str, term: &str) -> Result<Vec<CatalogItem>, CatalogError> {
    serde_json::from_str::<Option<Vec<CatalogItem>>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| CatalogError::Deserialize {
            context: format!("catalog search for \"{term}\""),
            source: e,
        })
}

fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY_CHARS {
        return trimmed.to_owned();
    }
    let mut cut: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
