use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::{Instant, sleep};

use super::client::{HttpFetch, RawResponse};
use crate::errors::CatalogError;

/// What a scripted fetch does for one URL
pub(crate) enum Step {
    Respond(RawResponse),
    Fail(CatalogError),
    Stall,
}

type Script = dyn Fn(&str) -> Step + Send + Sync;

/// `HttpFetch` fake that answers from a closure and records every call
pub(crate) struct ScriptedFetcher {
    script: Box<Script>,
    latency: Duration,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl ScriptedFetcher {
    pub(crate) fn new<F>(script: F) -> Self
    where
        F: Fn(&str) -> Step + Send + Sync + 'static,
    {
        Self {
            script: Box::new(script),
            latency: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with a 200 and the given JSON body
    pub(crate) fn ok_json(body: &'static str) -> Self {
        Self::new(move |_| Step::Respond(RawResponse::new(200, body)))
    }

    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(url, _)| url.clone()).collect()
    }

    pub(crate) fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(_, at)| *at).collect()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpFetch for ScriptedFetcher {
    async fn get(&self, url: &str) -> Result<RawResponse, CatalogError> {
        self.calls.lock().unwrap().push((url.to_string(), Instant::now()));

        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }

        match (self.script)(url) {
            Step::Respond(response) => Ok(response),
            Step::Fail(err) => Err(err),
            Step::Stall => std::future::pending().await,
        }
    }
}
