pub mod remote;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::grid::{NewSessionPayload, NodeDescriptor, NodeId, Session};
use crate::transport::TransportError;

pub use remote::RemoteDistributor;

#[derive(Debug, Error)]
pub enum DistributorError {
    /// `remove` was handed an unset node id; nothing was sent.
    #[error("Node ID must be set")]
    MissingNodeId,
    #[error("session not created: {message}")]
    SessionNotCreated { message: String },
    #[error("distributor call failed with status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),
    #[error("malformed payload or response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Session creation and worker-node bookkeeping for a grid.
///
/// Comes in two flavours: an engine that does the scheduling itself, and
/// [`RemoteDistributor`], which forwards every call to one over HTTP.
/// Callers hold the trait and should not care which they got.
#[async_trait]
pub trait Distributor: Send + Sync {
    /// Create a session matching `payload` somewhere on the grid.
    async fn new_session(&self, payload: &NewSessionPayload)
        -> Result<Session, DistributorError>;

    /// Register a worker node so sessions can be routed to it. Registering
    /// the same node twice is the service's call to handle, not ours.
    async fn add(&self, node: &NodeDescriptor) -> Result<(), DistributorError>;

    /// Deregister the node with the given id.
    async fn remove(&self, node_id: NodeId) -> Result<(), DistributorError>;
}
