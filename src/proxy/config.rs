use serde::Serialize;

use crate::utils::http::display_proxy_url;

/// Production transfers endpoint
pub const FLUTTERWAVE_TRANSFERS_URL: &str = "https://api.flutterwave.com/v3/transfers";

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Gateway configuration, built once at startup and shared read-only.
#[derive(Clone, Serialize)]
pub struct ProxyConfig {
    /// Credential injected into upstream calls.
    /// `None` is a degraded but valid state: every POST fails with 500.
    #[serde(skip_serializing)]
    pub flutterwave_secret_key: Option<String>,

    /// Bearer token callers must present. `None` matches no token.
    #[serde(skip_serializing)]
    pub auth_token: Option<String>,

    /// CORS origins; `*` allows any origin
    pub allowed_origins: Vec<String>,

    /// Listen port
    pub port: u16,

    /// Whether to accept connections from other hosts
    /// - true: bind 0.0.0.0 (default, the gateway runs behind a public IP)
    /// - false: bind 127.0.0.1
    pub allow_lan_access: bool,

    /// Upstream request timeout (seconds). `None` leaves it to the socket defaults.
    pub request_timeout: Option<u64>,

    /// Egress proxy (http://, https://, socks5://) for upstream calls
    pub upstream_proxy: Option<String>,

    /// Transfers endpoint. Only overridden for staging and tests.
    pub upstream_url: String,

    /// Largest inbound body accepted before the read is treated as failed
    pub max_body_bytes: usize,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            flutterwave_secret_key: None,
            auth_token: None,
            allowed_origins: vec!["*".to_string()],
            port: DEFAULT_PORT,
            allow_lan_access: true,
            request_timeout: None,
            upstream_proxy: None,
            upstream_url: FLUTTERWAVE_TRANSFERS_URL.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ProxyConfig {
    /// Get the actual listen address
    pub fn get_bind_address(&self) -> &str {
        if self.allow_lan_access {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        }
    }
}

// Secrets and proxy credentials never reach the logs, even through `{:?}`.
impl std::fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("flutterwave_secret_key", &redact(&self.flutterwave_secret_key))
            .field("auth_token", &redact(&self.auth_token))
            .field("allowed_origins", &self.allowed_origins)
            .field("port", &self.port)
            .field("allow_lan_access", &self.allow_lan_access)
            .field("request_timeout", &self.request_timeout)
            .field(
                "upstream_proxy",
                &self.upstream_proxy.as_deref().map(display_proxy_url),
            )
            .field("upstream_url", &self.upstream_url)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

fn redact(value: &Option<String>) -> &'static str {
    match value {
        Some(_) => "<redacted>",
        None => "<unset>",
    }
}
