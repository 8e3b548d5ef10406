use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so the only failure mode is an unparseable
/// value. Decoupled from the real environment so tests can use a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
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

    let env = parse_environment(&or_default("VMD_ENV", "development"))?;
    let log_level = or_default("VMD_LOG_LEVEL", "info");

    let scraper_request_timeout_secs = parse_u64("VMD_SCRAPER_REQUEST_TIMEOUT_SECS", "30")?;
    let scraper_user_agent = or_default(
        "VMD_SCRAPER_USER_AGENT",
        "vmd/0.1 (vaccination-availability)",
    );

    let doctolib_booking_base_url =
        or_default("DOCTOLIB_BOOKING_BASE_URL", "https://partners.doctolib.fr");
    let doctolib_search_base_url =
        or_default("DOCTOLIB_SEARCH_BASE_URL", "https://www.doctolib.fr");

    let mesoigner_enabled = parse_bool(
        "MESOIGNER_ENABLED",
        &or_default("MESOIGNER_ENABLED", "true"),
    )?;
    let mesoigner_api_key = lookup("MESOIGNER_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty());
    let mesoigner_horizon_days = parse_u32("MESOIGNER_HORIZON_DAYS", "50")?;

    Ok(AppConfig {
        env,
        log_level,
        scraper_request_timeout_secs,
        scraper_user_agent,
        doctolib_booking_base_url,
        doctolib_search_base_url,
        mesoigner_enabled,
        mesoigner_api_key,
        mesoigner_horizon_days,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "VMD_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

/// Parse a feature flag. Accepts `true/false`, `1/0`, `yes/no`, `on/off`.
fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
