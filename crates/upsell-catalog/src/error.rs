use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog rejected the API key (HTTP {status})")]
    Unauthorized { status: u16 },

    #[error("rate limited by catalog (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("unexpected HTTP status {status} from {url}: {body}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        body: String,
    },

    #[error("catalog is not configured: {0}")]
    Config(#[from] upsell_core::ConfigError),

    #[error("invalid catalog URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
