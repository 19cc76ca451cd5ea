use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::distributor::{Distributor, DistributorError};
use crate::grid::{NewSessionPayload, NodeDescriptor, NodeId, Session};
use crate::transport::Transport;
use crate::web::{self, HttpRequest};

/// Remote variant of [`Distributor`]: every call is a single HTTP round trip
/// against the distributor's wire paths. The only state is the transport,
/// fixed at construction, so a shared instance is safe to call from anywhere
/// the transport is.
pub struct RemoteDistributor<T> {
    transport: T,
}

impl<T: Transport> RemoteDistributor<T> {
    pub fn new(transport: T) -> Self {
        RemoteDistributor { transport }
    }
}

#[async_trait]
impl<T: Transport> Distributor for RemoteDistributor<T> {
    async fn new_session(
        &self,
        payload: &NewSessionPayload,
    ) -> Result<Session, DistributorError> {
        let mut body = String::new();
        payload.write_to(&mut body)?;

        let request = HttpRequest::new(Method::POST, "/session").with_body(body.into_bytes());
        let response = self.transport.execute(request).await?;

        let session: Session =
            web::interpret(&response)?.ok_or_else(|| DistributorError::UnexpectedStatus {
                status: response.status,
                body: response.text(),
            })?;
        debug!(session_id = %session.id, "session created");
        Ok(session)
    }

    async fn add(&self, node: &NodeDescriptor) -> Result<(), DistributorError> {
        let body = serde_json::to_vec(node)?;
        let request = HttpRequest::new(Method::POST, "/se/grid/distributor/node").with_body(body);
        let response = self.transport.execute(request).await?;

        // Decode for the error side only; a success payload is discarded
        web::interpret::<Value>(&response)?;
        debug!(node_id = %node.id, uri = %node.uri, "node registered with distributor");
        Ok(())
    }

    async fn remove(&self, node_id: NodeId) -> Result<(), DistributorError> {
        if node_id.is_nil() {
            return Err(DistributorError::MissingNodeId);
        }

        let request = HttpRequest::new(
            Method::DELETE,
            format!("/se/grid/distributor/node/{node_id}"),
        );
        let response = self.transport.execute(request).await?;

        web::interpret::<Value>(&response)?;
        debug!(node_id = %node_id, "node removed from distributor");
        Ok(())
    }
}
