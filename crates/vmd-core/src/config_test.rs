use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("unknown").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "VMD_ENV"));
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.scraper_request_timeout_secs, 30);
    assert_eq!(cfg.scraper_user_agent, "vmd/0.1 (vaccination-availability)");
    assert_eq!(cfg.doctolib_booking_base_url, "https://partners.doctolib.fr");
    assert_eq!(cfg.doctolib_search_base_url, "https://www.doctolib.fr");
    assert!(cfg.mesoigner_enabled);
    assert!(cfg.mesoigner_api_key.is_none());
    assert_eq!(cfg.mesoigner_horizon_days, 50);
}

#[test]
fn build_app_config_fails_with_invalid_env() {
    let mut map = HashMap::new();
    map.insert("VMD_ENV", "staging");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VMD_ENV"),
        "expected InvalidEnvVar(VMD_ENV), got: {result:?}"
    );
}

#[test]
fn scraper_request_timeout_secs_override() {
    let mut map = HashMap::new();
    map.insert("VMD_SCRAPER_REQUEST_TIMEOUT_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper_request_timeout_secs, 60);
}

#[test]
fn scraper_request_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("VMD_SCRAPER_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VMD_SCRAPER_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(VMD_SCRAPER_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn scraper_user_agent_override() {
    let mut map = HashMap::new();
    map.insert("VMD_SCRAPER_USER_AGENT", "custom-agent/2.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper_user_agent, "custom-agent/2.0");
}

#[test]
fn doctolib_base_urls_override() {
    let mut map = HashMap::new();
    map.insert("DOCTOLIB_BOOKING_BASE_URL", "http://127.0.0.1:8080");
    map.insert("DOCTOLIB_SEARCH_BASE_URL", "http://127.0.0.1:8081");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.doctolib_booking_base_url, "http://127.0.0.1:8080");
    assert_eq!(cfg.doctolib_search_base_url, "http://127.0.0.1:8081");
}

#[test]
fn mesoigner_enabled_accepts_common_spellings() {
    for (raw, expected) in [
        ("false", false),
        ("0", false),
        ("NO", false),
        ("off", false),
        ("true", true),
        ("1", true),
        ("Yes", true),
    ] {
        let mut map = HashMap::new();
        map.insert("MESOIGNER_ENABLED", raw);
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.mesoigner_enabled, expected, "MESOIGNER_ENABLED={raw}");
    }
}

#[test]
fn mesoigner_enabled_invalid() {
    let mut map = HashMap::new();
    map.insert("MESOIGNER_ENABLED", "maybe");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MESOIGNER_ENABLED"),
        "expected InvalidEnvVar(MESOIGNER_ENABLED), got: {result:?}"
    );
}

#[test]
fn mesoigner_api_key_blank_is_treated_as_absent() {
    let mut map = HashMap::new();
    map.insert("MESOIGNER_API_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.mesoigner_api_key.is_none());
}

#[test]
fn mesoigner_api_key_is_redacted_in_debug() {
    let mut map = HashMap::new();
    map.insert("MESOIGNER_API_KEY", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.mesoigner_api_key.as_deref(), Some("super-secret"));
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("super-secret"), "key leaked: {debug}");
    assert!(debug.contains("[redacted]"));
}

#[test]
fn mesoigner_horizon_days_invalid() {
    let mut map = HashMap::new();
    map.insert("MESOIGNER_HORIZON_DAYS", "-3");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MESOIGNER_HORIZON_DAYS"),
        "expected InvalidEnvVar(MESOIGNER_HORIZON_DAYS), got: {result:?}"
    );
}
