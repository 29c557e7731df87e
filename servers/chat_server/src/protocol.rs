//! Wire frames for the relay. Inbound frames are validated before anything
//! is broadcast; the error strings are safe to echo back to the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateAction {
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Chat {
        user: String,
        text: String,
    },
    ProductsUpdate {
        action: UpdateAction,
        #[serde(rename = "productId")]
        product_id: u64,
    },
}

impl ClientMessage {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let message: ClientMessage =
            serde_json::from_str(raw).map_err(|_| "invalid message format".to_owned())?;
        message.validate()?;
        Ok(message)
    }

    fn validate(&self) -> Result<(), String> {
        if let ClientMessage::Chat { user, text } = self {
            if user.is_empty() {
                return Err("user required".to_owned());
            }
            if text.is_empty() {
                return Err("text required".to_owned());
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    System {
        text: String,
    },
    Chat {
        user: String,
        text: String,
        timestamp: DateTime<Utc>,
    },
    ProductsUpdate {
        action: UpdateAction,
        #[serde(rename = "productId")]
        product_id: u64,
        timestamp: DateTime<Utc>,
    },
    Error {
        text: String,
    },
}

impl ServerMessage {
    pub fn welcome() -> Self {
        ServerMessage::System {
            text: "Welcome to the support chat!".to_owned(),
        }
    }

    pub fn error<S: Into<String>>(text: S) -> Self {
        ServerMessage::Error { text: text.into() }
    }

    /// The stamped broadcast frame for a validated inbound message.
    pub fn broadcast_for(message: ClientMessage) -> Self {
        match message {
            ClientMessage::Chat { user, text } => ServerMessage::Chat {
                user,
                text,
                timestamp: Utc::now(),
            },
            ClientMessage::ProductsUpdate { action, product_id } => {
                ServerMessage::ProductsUpdate {
                    action,
                    product_id,
                    timestamp: Utc::now(),
                }
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"type":"error","text":"serialization failure"}"#.to_owned())
    }
}
