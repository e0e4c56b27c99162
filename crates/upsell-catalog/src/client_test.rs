use super::*;

fn client(base_url: &str) -> CatalogClient {
    CatalogClient::new(base_url, "k", 5, "upsell-test/0.1").unwrap()
}

#[test]
fn search_url_appends_term() {
    let c = client("https://catalog.example.com/task/products/search");
    assert_eq!(
        c.search_url("towel").as_str(),
        "https://catalog.example.com/task/products/search?search=towel"
    );
}

#[test]
fn search_url_encodes_term() {
    let c = client("https://catalog.example.com/search");
    assert_eq!(
        c.search_url("linen & co").as_str(),
        "https://catalog.example.com/search?search=linen+%26+co"
    );
}

#[test]
fn search_url_keeps_empty_term() {
    let c = client("https://catalog.example.com/search");
    assert_eq!(
        c.search_url("").as_str(),
        "https://catalog.example.com/search?search="
    );
}

#[test]
fn new_rejects_unparseable_base_url() {
    let err = CatalogClient::new("not a url", "k", 5, "ua").unwrap_err();
    assert!(
        matches!(err, CatalogError::InvalidBaseUrl { .. }),
        "expected InvalidBaseUrl, got: {err:?}"
    );
}

#[test]
fn debug_redacts_api_key() {
    let c = CatalogClient::new("https://catalog.example.com/search", "hunter2", 5, "ua").unwrap();
    let rendered = format!("{c:?}");
    assert!(!rendered.contains("hunter2"));
}

#[test]
fn null_body_is_empty_result() {
    assert!(parse_search_body("null", "x").unwrap().is_empty());
}

#[test]
fn object_body_is_a_deserialize_error() {
    let err = parse_search_body(r#"{"products": []}"#, "x").unwrap_err();
    assert!(matches!(err, CatalogError::Deserialize { .. }));
}

#[test]
fn truncate_body_limits_length() {
    let long = "x".repeat(500);
    let cut = truncate_body(&long);
    assert_eq!(cut.chars().count(), MAX_ERROR_BODY_CHARS + 1);
    assert!(cut.ends_with('…'));
    assert_eq!(truncate_body("  short  "), "short");
}

fn config(api_key: Option<&str>) -> AppConfig {
    AppConfig {
        env: upsell_core::Environment::Test,
        log_level: "info".to_owned(),
        catalog_url: "https://catalog.example.com/search".to_owned(),
        catalog_api_key: api_key.map(str::to_owned),
        session_dir: "./.upsell-session".into(),
        catalog_timeout_secs: 5,
        catalog_user_agent: "upsell-test/0.1".to_owned(),
        catalog_max_retries: 2,
        catalog_retry_backoff_base_ms: 10,
    }
}

#[test]
fn from_config_requires_api_key() {
    let err = CatalogClient::from_config(&config(None)).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Config(ConfigError::MissingEnvVar(ref var)) if var == API_KEY_VAR
    ));
}

#[test]
fn from_config_applies_retry_settings() {
    let c = CatalogClient::from_config(&config(Some("k"))).unwrap();
    assert_eq!(c.max_retries, 2);
    assert_eq!(c.backoff_base_ms, 10);
}
