use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub catalog_url: String,
    pub catalog_api_key: Option<String>,
    pub session_dir: PathBuf,
    pub catalog_timeout_secs: u64,
    pub catalog_user_agent: String,
    pub catalog_max_retries: u32,
    pub catalog_retry_backoff_base_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("catalog_url", &self.catalog_url)
            .field(
                "catalog_api_key",
                &self.catalog_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("session_dir", &self.session_dir)
            .field("catalog_timeout_secs", &self.catalog_timeout_secs)
            .field("catalog_user_agent", &self.catalog_user_agent)
            .field("catalog_max_retries", &self.catalog_max_retries)
            .field(
                "catalog_retry_backoff_base_ms",
                &self.catalog_retry_backoff_base_ms,
            )
            .finish()
    }
}
