use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request descriptor for a new session.
///
/// The contents are opaque to this crate: whatever the caller supplies is
/// streamed out unchanged as the `new_session` request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewSessionPayload(Value);

impl NewSessionPayload {
    pub fn new(value: Value) -> Self {
        NewSessionPayload(value)
    }

    /// Parse a payload from raw JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text).map(NewSessionPayload)
    }

    /// Append the serialized form of the payload to `buf`.
    pub fn write_to(&self, buf: &mut String) -> Result<(), serde_json::Error> {
        buf.push_str(&serde_json::to_string(&self.0)?);
        Ok(())
    }
}

impl From<Value> for NewSessionPayload {
    fn from(value: Value) -> Self {
        NewSessionPayload(value)
    }
}
