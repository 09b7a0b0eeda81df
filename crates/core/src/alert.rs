use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Anything that carries a free-text alert message.
///
/// Rules only ever read the message, so any inbound representation can be
/// evaluated as long as it exposes one.
pub trait Alert {
    fn message(&self) -> &str;
}

impl Alert for str {
    fn message(&self) -> &str {
        self
    }
}

impl Alert for String {
    fn message(&self) -> &str {
        self.as_str()
    }
}

impl<A: Alert + ?Sized> Alert for &A {
    fn message(&self) -> &str {
        (**self).message()
    }
}

/// An inbound alert event as received from a monitoring source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertEvent {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Service identifier used to select the rule sets.
    pub service: String,
    pub message: String,
    #[serde(default = "Utc::now")]
    pub received_at: DateTime<Utc>,
}

impl AlertEvent {
    pub fn new(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            service: service.into(),
            message: message.into(),
            received_at: Utc::now(),
        }
    }
}

impl Alert for AlertEvent {
    fn message(&self) -> &str {
        &self.message
    }
}
