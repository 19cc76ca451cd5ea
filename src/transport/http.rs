use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::trace;

use crate::transport::{Transport, TransportError};
use crate::web::{HttpRequest, HttpResponse};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Production transport backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(HttpTransport { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);
        trace!(method = %request.method, url = %url, "executing distributor request");

        let mut builder = self.client.request(request.method, &url);
        if !request.body.is_empty() {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(request.body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        Ok(HttpResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use reqwest::Method;

    #[tokio::test]
    async fn test_execute_posts_body_with_json_content_type() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/session")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Exact(r#"{"capabilities":{}}"#.into()))
            .with_status(200)
            .with_body(r#"{"value":null}"#)
            .create_async()
            .await;

        let transport = HttpTransport::new(server.url()).unwrap();
        let request = HttpRequest::new(Method::POST, "/session")
            .with_body(br#"{"capabilities":{}}"#.to_vec());
        let response = transport.execute(request).await.unwrap();

        assert_eq!(response.status.as_u16(), 200);
        assert_eq!(response.text(), r#"{"value":null}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_returned_not_raised() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/se/grid/distributor/node/abc")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let transport = HttpTransport::new(server.url()).unwrap();
        let request = HttpRequest::new(Method::DELETE, "/se/grid/distributor/node/abc");
        let response = transport.execute(request).await.unwrap();

        assert_eq!(response.status.as_u16(), 500);
        assert_eq!(response.text(), "boom");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url_is_normalized() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/session")
            .with_status(200)
            .create_async()
            .await;

        let transport = HttpTransport::new(format!("{}/", server.url())).unwrap();
        let request = HttpRequest::new(Method::POST, "/session").with_body(b"{}".to_vec());
        transport.execute(request).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_transport_fault() {
        // Grab a port that was listening and no longer is
        let url = {
            let server = Server::new_async().await;
            server.url()
        };

        let transport = HttpTransport::new(url).unwrap();
        let request = HttpRequest::new(Method::POST, "/session").with_body(b"{}".to_vec());
        let err = transport.execute(request).await.unwrap_err();
        assert!(matches!(err, TransportError::Http(_)));
    }
}
