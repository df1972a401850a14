pub mod client;
pub mod proxy;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{HttpFetch, RawResponse, ReqwestFetcher};
pub use proxy::ProxyEndpoint;
pub use transport::ProxyTransport;
