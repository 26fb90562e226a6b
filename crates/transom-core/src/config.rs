use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

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
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
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

    let backend_url = require("TRANSOM_BACKEND_URL")?;
    if backend_url.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "TRANSOM_BACKEND_URL".to_string(),
            reason: "must be non-empty".to_string(),
        });
    }

    let env = parse_environment(&or_default("TRANSOM_ENV", "development"));

    let bind_addr = parse_addr("TRANSOM_BIND_ADDR", "0.0.0.0:4000")?;
    let log_level = or_default("TRANSOM_LOG_LEVEL", "info");
    let backend_token = lookup("TRANSOM_BACKEND_TOKEN").ok();
    let webhook_secret = lookup("TRANSOM_WEBHOOK_SECRET").ok();
    let taxonomy_path = lookup("TRANSOM_TAXONOMY_PATH").ok().map(PathBuf::from);

    let http_timeout_secs = parse_u64("TRANSOM_HTTP_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("TRANSOM_USER_AGENT", "transom/0.1 (storefront)");
    let page_size = parse_u32("TRANSOM_PAGE_SIZE", "250")?;
    let max_retries = parse_u32("TRANSOM_MAX_RETRIES", "3")?;
    let retry_backoff_base_secs = parse_u64("TRANSOM_RETRY_BACKOFF_BASE_SECS", "5")?;
    let inter_request_delay_ms = parse_u64("TRANSOM_INTER_REQUEST_DELAY_MS", "250")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        backend_url,
        backend_token,
        webhook_secret,
        taxonomy_path,
        http_timeout_secs,
        user_agent,
        page_size,
        max_retries,
        retry_backoff_base_secs,
        inter_request_delay_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
