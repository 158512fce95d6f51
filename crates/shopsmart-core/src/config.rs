use crate::app_config::{AppConfig, Environment, ProviderSettings};
use crate::ConfigError;

/// Credential values that ship in sample `.env` files and never
/// authenticate. Any of these selects mock mode.
const PLACEHOLDER_API_KEYS: &[&str] = &[
    "your_api_key_here",
    "your-api-key",
    "changeme",
    "placeholder",
    "xxx",
];

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
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        parse_flag(&or_default(var, default)).ok_or_else(|| {
            invalid(
                var,
                "expected one of true/false/1/0/yes/no".to_string(),
            )
        })
    };

    let env = parse_environment(&or_default("SHOPSMART_ENV", "development"))?;
    let bind_addr = parse_addr("SHOPSMART_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SHOPSMART_LOG_LEVEL", "info");

    let api_key = lookup("SHOPSMART_PRICING_API_KEY")
        .ok()
        .and_then(|raw| usable_api_key(&raw));

    let provider = ProviderSettings {
        api_key,
        base_url: or_default(
            "SHOPSMART_PRICING_API_URL",
            "https://api.grocerydata.com.au/v1",
        ),
        request_timeout_secs: parse_u64("SHOPSMART_PROVIDER_TIMEOUT_SECS", "10")?,
        deadline_ms: parse_u64("SHOPSMART_PROVIDER_DEADLINE_MS", "8000")?,
        max_results: parse_u32("SHOPSMART_PROVIDER_MAX_RESULTS", "50")?,
        default_location: or_default("SHOPSMART_PROVIDER_LOCATION", "Sydney, NSW"),
        include_promotions: parse_bool("SHOPSMART_PROVIDER_INCLUDE_PROMOTIONS", "true")?,
        include_nutrition: parse_bool("SHOPSMART_PROVIDER_INCLUDE_NUTRITION", "false")?,
        max_retries: parse_u32("SHOPSMART_PROVIDER_MAX_RETRIES", "1")?,
        retry_backoff_base_ms: parse_u64("SHOPSMART_PROVIDER_RETRY_BACKOFF_MS", "250")?,
        user_agent: or_default("SHOPSMART_USER_AGENT", "shopsmart/0.1 (price-comparison)"),
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        provider,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHOPSMART_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Returns the trimmed key, or `None` when it is blank or a known placeholder.
fn usable_api_key(raw: &str) -> Option<String> {
    let key = raw.trim();
    if key.is_empty() {
        return None;
    }
    let lowered = key.to_ascii_lowercase();
    if PLACEHOLDER_API_KEYS.contains(&lowered.as_str()) {
        return None;
    }
    Some(key.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
