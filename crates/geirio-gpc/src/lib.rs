pub mod client;
pub mod extract;
pub mod proxy;

pub use client::GpcClient;
pub use proxy::{ProxyClient, ProxyLookup};

#[derive(Debug, thiserror::Error)]
pub enum GpcError {
    #[error("search query must not be empty")]
    EmptyQuery,

    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no match found")]
    NoMatch,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("upstream dictionary failure: {0}")]
    Upstream(String),
}
