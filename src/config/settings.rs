use log::warn;
use std::str::FromStr;
use std::time::Duration;

use crate::http::ProxyEndpoint;

pub struct ClientSettings {
    pub base_url: String,
    pub proxies: Vec<ProxyEndpoint>,
    pub user_agent: String,
    pub timeout: Duration,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub cache_ttl: Duration,
    pub cache_high_water: usize,
    pub rate_limit_delay: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.mangadex.org".to_string(),
            proxies: vec![
                ProxyEndpoint::relay("https://corsproxy.io/?"),
                ProxyEndpoint::relay("https://api.allorigins.win/raw?url="),
            ],
            user_agent: "ManhwaCatalog/1.0".to_string(),
            timeout: Duration::from_secs(10),
            max_retries: 3,
            retry_delay: Duration::from_millis(1000),
            cache_ttl: Duration::from_secs(60),
            cache_high_water: 100,
            rate_limit_delay: Duration::from_millis(500), // 2 req/sec
        }
    }
}

#[derive(Default)]
pub struct ServerSettings {
    pub admin_token: Option<String>,
}

pub struct AppConfig {
    pub client: ClientSettings,
    pub server: ServerSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            client: ClientSettings::default(),
            server: ServerSettings::default(),
        }
    }

    /// Defaults overridden by process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each known key
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();
        let client = &mut config.client;

        if let Some(url) = lookup("CATALOG_BASE_URL") {
            client.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(list) = lookup("CATALOG_PROXIES") {
            client.proxies = parse_proxy_list(&list);
        }
        if let Some(secs) = parse_var(&lookup, "CATALOG_TIMEOUT_SECS") {
            client.timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = parse_var(&lookup, "CATALOG_MAX_RETRIES") {
            client.max_retries = retries;
        }
        if let Some(ms) = parse_var(&lookup, "CATALOG_RETRY_DELAY_MS") {
            client.retry_delay = Duration::from_millis(ms);
        }
        if let Some(secs) = parse_var(&lookup, "CATALOG_CACHE_TTL_SECS") {
            client.cache_ttl = Duration::from_secs(secs);
        }
        if let Some(ms) = parse_var(&lookup, "CATALOG_RATE_LIMIT_MS") {
            client.rate_limit_delay = Duration::from_millis(ms);
        }

        config.server.admin_token = lookup("ADMIN_TOKEN").filter(|token| !token.is_empty());
        config
    }
}

// --- Helper Functions ---

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}: cannot parse {:?}", key, raw);
            None
        }
    }
}

fn parse_proxy_list(list: &str) -> Vec<ProxyEndpoint> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| match item {
            "direct" => ProxyEndpoint::Direct,
            prefix => ProxyEndpoint::relay(prefix),
        })
        .collect()
}
