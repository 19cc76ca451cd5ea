use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::grid::NodeId;

fn default_max_sessions() -> u32 {
    1
}

/// Registration record for a worker node: who it is, where it listens and
/// what it can run. Serialized verbatim as the `add` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDescriptor {
    pub id: NodeId,
    /// Base URI the node serves sessions on, e.g. `http://10.0.0.5:5555`
    pub uri: String,
    #[serde(default = "default_max_sessions", alias = "maxSessions")]
    pub max_sessions: u32,
    #[serde(default)]
    pub capabilities: Vec<Value>,
}

impl NodeDescriptor {
    pub fn new(uri: impl Into<String>) -> Self {
        NodeDescriptor {
            id: NodeId::new(),
            uri: uri.into(),
            max_sessions: default_max_sessions(),
            capabilities: Vec::new(),
        }
    }
}
