use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Env var holding the catalog API key.
pub const API_KEY_VAR: &str = "UPSELL_CATALOG_API_KEY";

const DEFAULT_CATALOG_URL: &str = "https://stageapi.monkcommerce.app/task/products/search";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function,
/// so tests can feed a plain `HashMap` instead of touching the process env.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    // Blank counts as unset.
    let catalog_api_key = lookup(API_KEY_VAR)
        .ok()
        .filter(|v| !v.trim().is_empty());

    let env = parse_environment(&or_default("UPSELL_ENV", "development"))?;
    let log_level = or_default("UPSELL_LOG_LEVEL", "info");

    let catalog_url = or_default("UPSELL_CATALOG_URL", DEFAULT_CATALOG_URL);
    if !(catalog_url.starts_with("https://") || catalog_url.starts_with("http://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "UPSELL_CATALOG_URL".to_string(),
            reason: format!("expected an http(s) URL, got \"{catalog_url}\""),
        });
    }

    let session_dir = PathBuf::from(or_default("UPSELL_SESSION_DIR", "./.upsell-session"));

    let catalog_timeout_secs = parse_u64("UPSELL_CATALOG_TIMEOUT_SECS", "30")?;
    if catalog_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "UPSELL_CATALOG_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let catalog_user_agent = or_default("UPSELL_CATALOG_USER_AGENT", "upsell/0.1 (product-picker)");
    let catalog_max_retries = parse_u32("UPSELL_CATALOG_MAX_RETRIES", "0")?;
    let catalog_retry_backoff_base_ms = parse_u64("UPSELL_CATALOG_RETRY_BACKOFF_BASE_MS", "500")?;

    Ok(AppConfig {
        env,
        log_level,
        catalog_url,
        catalog_api_key,
        session_dir,
        catalog_timeout_secs,
        catalog_user_agent,
        catalog_max_retries,
        catalog_retry_backoff_base_ms,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "production" => Ok(Environment::Production),
        "test" => Ok(Environment::Test),
        other => Err(ConfigError::InvalidEnvVar {
            var: "UPSELL_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
