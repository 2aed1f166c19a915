use crate::app_config::{AppConfig, PacingMode};
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
/// Every variable has a default, so an empty environment yields a usable
/// configuration for the default storefront.
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

    let log_level = or_default("SHOPCAT_LOG_LEVEL", "info");
    let webdriver_url = or_default("SHOPCAT_WEBDRIVER_URL", "http://localhost:9515");
    let debugger_address = Some(or_default("SHOPCAT_DEBUGGER_ADDRESS", "127.0.0.1:9222"))
        .map(|addr| addr.trim().to_string())
        .filter(|addr| !addr.is_empty());
    let store_url_prefix = or_default("SHOPCAT_STORE_URL_PREFIX", "https://shopee.co.id");
    let output_path = PathBuf::from(or_default("SHOPCAT_OUTPUT_PATH", "shop_catalog.xlsx"));

    let initial_wait_secs = parse_u64("SHOPCAT_INITIAL_WAIT_SECS", "20")?;
    let control_wait_secs = parse_u64("SHOPCAT_CONTROL_WAIT_SECS", "5")?;
    let max_scroll_attempts = parse_u32("SHOPCAT_MAX_SCROLL_ATTEMPTS", "3")?;
    let max_load_more_clicks = parse_u32("SHOPCAT_MAX_LOAD_MORE_CLICKS", "500")?;
    let pacing = parse_pacing(&or_default("SHOPCAT_PACING", "random"))?;

    Ok(AppConfig {
        log_level,
        webdriver_url,
        debugger_address,
        store_url_prefix,
        output_path,
        initial_wait_secs,
        control_wait_secs,
        max_scroll_attempts,
        max_load_more_clicks,
        pacing,
    })
}

/// Parse a string into a `PacingMode` variant.
fn parse_pacing(s: &str) -> Result<PacingMode, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "random" => Ok(PacingMode::Random),
        "off" | "none" => Ok(PacingMode::Off),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHOPCAT_PACING".to_string(),
            reason: format!("expected \"random\" or \"off\", got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
