//! Response bodies.

use serde::{Deserialize, Serialize};

/// Acknowledges a write.
///
/// `data` is only present for endpoints that echo back what they stored.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Ack<T> {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Ack<T> {
    /// A successful acknowledgement without data.
    pub fn ok(message: impl Into<String>) -> Ack<T> {
        Ack {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    /// Attaches the stored data.
    pub fn with_data(self, data: T) -> Ack<T> {
        Ack {
            data: Some(data),
            ..self
        }
    }
}
