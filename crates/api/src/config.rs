use std::time::Duration;

use masjid_sources::http::DEFAULT_UPSTREAM_TIMEOUT;
use masjid_sources::{aladhan, bmkg, openweather, prayzone};

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the
/// database URL, which `main` reads separately.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8001`).
    pub port: u16,
    /// Allowed CORS origins from comma-separated `CORS_ORIGINS`. A single
    /// `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Per-request timeout for upstream providers in seconds (default: `10`).
    pub upstream_timeout_secs: u64,
    pub upstreams: UpstreamConfig,
}

/// Base URLs and credentials of the upstream providers.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub aladhan_base_url: String,
    pub prayzone_base_url: String,
    pub openweather_base_url: String,
    /// Absent means the weather widget always shows its fallback.
    pub openweather_api_key: Option<String>,
    pub bmkg_base_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                              |
    /// |-------------------------|--------------------------------------|
    /// | `HOST`                  | `0.0.0.0`                            |
    /// | `PORT`                  | `8001`                               |
    /// | `CORS_ORIGINS`          | `*`                                  |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                                 |
    /// | `UPSTREAM_TIMEOUT_SECS` | `10`                                 |
    /// | `ALADHAN_BASE_URL`      | `https://api.aladhan.com`            |
    /// | `PRAYZONE_BASE_URL`     | `https://api.pray.zone`              |
    /// | `OPENWEATHER_BASE_URL`  | `https://api.openweathermap.org`     |
    /// | `OPENWEATHER_API_KEY`   | unset                                |
    /// | `BMKG_BASE_URL`         | `https://data.bmkg.go.id`            |
    pub fn from_env() -> Self {
        let host = env_or("HOST", "0.0.0.0");

        let port: u16 = env_or("PORT", "8001")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(&env_or("CORS_ORIGINS", "*"));

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let upstream_timeout_secs: u64 = std::env::var("UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_UPSTREAM_TIMEOUT.as_secs().to_string())
            .parse()
            .expect("UPSTREAM_TIMEOUT_SECS must be a valid u64");

        let upstreams = UpstreamConfig {
            aladhan_base_url: env_or("ALADHAN_BASE_URL", aladhan::DEFAULT_BASE_URL),
            prayzone_base_url: env_or("PRAYZONE_BASE_URL", prayzone::DEFAULT_BASE_URL),
            openweather_base_url: env_or("OPENWEATHER_BASE_URL", openweather::DEFAULT_BASE_URL),
            openweather_api_key: std::env::var("OPENWEATHER_API_KEY")
                .ok()
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            bmkg_base_url: env_or("BMKG_BASE_URL", bmkg::DEFAULT_BASE_URL),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upstream_timeout_secs,
            upstreams,
        }
    }

    /// Raise the request timeout so a request can outlast `budget` by a
    /// second. Returns `true` when the timeout was changed.
    pub fn fit_request_timeout(&mut self, budget: Duration) -> bool {
        let floor = budget.as_secs() + u64::from(budget.subsec_nanos() > 0) + 1;
        if self.request_timeout_secs >= floor {
            return false;
        }
        self.request_timeout_secs = floor;
        true
    }

    /// `true` when CORS should allow any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            aladhan_base_url: aladhan::DEFAULT_BASE_URL.to_string(),
            prayzone_base_url: prayzone::DEFAULT_BASE_URL.to_string(),
            openweather_base_url: openweather::DEFAULT_BASE_URL.to_string(),
            openweather_api_key: None,
            bmkg_base_url: bmkg::DEFAULT_BASE_URL.to_string(),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
