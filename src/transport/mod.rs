pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::web::{HttpRequest, HttpResponse};

pub use http::HttpTransport;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Capability to execute one HTTP request against the distributor.
///
/// Implementations own connection handling, TLS and timeouts. Callers get
/// exactly one attempt per call; retries are not a transport concern either.
/// A non-2xx reply is still a reply: it comes back as a response, never as
/// an error.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

// A shared transport is a transport
#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request).await
    }
}
