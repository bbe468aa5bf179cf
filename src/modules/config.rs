use crate::error::{AppError, AppResult};
use crate::proxy::config::{ProxyConfig, FLUTTERWAVE_TRANSFERS_URL};
use std::str::FromStr;

pub const ENV_SECRET_KEY: &str = "FLUTTERWAVE_SECRET_KEY";
pub const ENV_AUTH_TOKEN: &str = "PROXY_AUTH_TOKEN";
pub const ENV_ALLOWED_ORIGINS: &str = "ALLOWED_ORIGINS";
pub const ENV_PORT: &str = "PROXY_PORT";
pub const ENV_ALLOW_LAN_ACCESS: &str = "PROXY_ALLOW_LAN_ACCESS";
pub const ENV_REQUEST_TIMEOUT: &str = "PROXY_REQUEST_TIMEOUT_SECS";
pub const ENV_MAX_BODY_BYTES: &str = "PROXY_MAX_BODY_BYTES";
pub const ENV_UPSTREAM_PROXY: &str = "UPSTREAM_PROXY_URL";
pub const ENV_UPSTREAM_URL: &str = "FLUTTERWAVE_API_URL";

/// Load gateway config from the process environment
pub fn load_proxy_config() -> AppResult<ProxyConfig> {
    load_proxy_config_from(|key| std::env::var(key).ok())
}

/// Load gateway config through an arbitrary variable lookup.
///
/// Empty values count as unset. A missing secret or token is not an error:
/// the gateway starts and rejects transfers until it is configured.
pub fn load_proxy_config_from<F>(lookup: F) -> AppResult<ProxyConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    let defaults = ProxyConfig::default();

    let allowed_origins = var(ENV_ALLOWED_ORIGINS)
        .map(|raw| parse_origins(&raw))
        .filter(|origins| !origins.is_empty())
        .unwrap_or(defaults.allowed_origins);

    let upstream_url = match var(ENV_UPSTREAM_URL) {
        Some(raw) => {
            url::Url::parse(raw.trim())
                .map_err(|e| AppError::Config(format!("{} is not a valid URL: {}", ENV_UPSTREAM_URL, e)))?;
            raw.trim().to_string()
        }
        None => FLUTTERWAVE_TRANSFERS_URL.to_string(),
    };

    let upstream_proxy = var(ENV_UPSTREAM_PROXY).map(|v| v.trim().to_string());
    if let Some(proxy) = upstream_proxy.as_deref() {
        crate::utils::http::validate_proxy_url(proxy)?;
    }

    Ok(ProxyConfig {
        flutterwave_secret_key: var(ENV_SECRET_KEY),
        auth_token: var(ENV_AUTH_TOKEN),
        allowed_origins,
        port: parse_var(&var, ENV_PORT)?.unwrap_or(defaults.port),
        allow_lan_access: parse_var(&var, ENV_ALLOW_LAN_ACCESS)?
            .unwrap_or(defaults.allow_lan_access),
        request_timeout: parse_var(&var, ENV_REQUEST_TIMEOUT)?,
        upstream_proxy,
        upstream_url,
        max_body_bytes: parse_var(&var, ENV_MAX_BODY_BYTES)?.unwrap_or(defaults.max_body_bytes),
    })
}

/// Split a comma separated origin list, dropping blanks
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_var<T, F>(var: &F, key: &str) -> AppResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    var(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| AppError::Config(format!("invalid {} value {:?}: {}", key, raw, e)))
        })
        .transpose()
}
