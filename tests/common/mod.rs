use async_trait::async_trait;
use std::sync::Mutex;
use tokio::time::Instant;

use manhwa_catalog::CatalogError;
use manhwa_catalog::config::ClientSettings;
use manhwa_catalog::http::{HttpFetch, ProxyEndpoint, RawResponse};

pub const BASE_URL: &str = "https://api.test";

type Route = dyn Fn(&str) -> RawResponse + Send + Sync;

/// Catalog stand-in that answers from a routing closure and records each URL it sees
pub struct FakeCatalog {
    route: Box<Route>,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl FakeCatalog {
    pub fn new<F>(route: F) -> Self
    where
        F: Fn(&str) -> RawResponse + Send + Sync + 'static,
    {
        Self {
            route: Box::new(route),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn json(body: &'static str) -> Self {
        Self::new(move |_| RawResponse::new(200, body))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(url, _)| url.clone()).collect()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(_, at)| *at).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpFetch for FakeCatalog {
    async fn get(&self, url: &str) -> Result<RawResponse, CatalogError> {
        self.calls.lock().unwrap().push((url.to_string(), Instant::now()));
        Ok((self.route)(url))
    }
}

/// Direct connection to the fake catalog
pub fn direct_settings() -> ClientSettings {
    ClientSettings {
        base_url: BASE_URL.to_string(),
        proxies: vec![ProxyEndpoint::Direct],
        ..ClientSettings::default()
    }
}

pub fn chapter_json(id: &str, number: u32) -> String {
    format!(
        r#"{{"id":"{id}","attributes":{{"volume":null,"chapter":"{number}","title":null,"translatedLanguage":"en","publishAt":"2024-01-01T00:00:00+00:00","pages":10}}}}"#
    )
}

/// Value of `key` in the query string of `url`
pub fn query_value<'a>(url: &'a str, key: &str) -> Option<&'a str> {
    let (_, query) = url.split_once('?')?;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}
