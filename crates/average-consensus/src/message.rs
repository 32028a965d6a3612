//! Value messages exchanged between neighbors.
//!
//! A payload is the sender's value in textual form. Decoding can fail; a
//! malformed payload is dropped by the receiver for that round and never
//! retried.

use average_topology::NodeId;
use thiserror::Error;

/// One broadcast from `from` to a single neighbor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub from: NodeId,
    pub body: String,
}

/// A payload that does not decode to a finite number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed payload from {from}: {body:?}")]
pub struct MalformedMessage {
    pub from: NodeId,
    pub body: String,
}

impl Message {
    /// Encode `value` as sent by `from`.
    ///
    /// `f64`'s `Display` output round-trips exactly through `parse`.
    pub fn with_value(from: NodeId, value: f64) -> Self {
        Self {
            from,
            body: value.to_string(),
        }
    }

    /// A message carrying an arbitrary raw payload.
    pub fn raw(from: NodeId, body: impl Into<String>) -> Self {
        Self {
            from,
            body: body.into(),
        }
    }

    /// Decode the carried value. NaN and infinities count as malformed.
    pub fn decode(&self) -> Result<f64, MalformedMessage> {
        match self.body.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(MalformedMessage {
                from: self.from,
                body: self.body.clone(),
            }),
        }
    }
}
