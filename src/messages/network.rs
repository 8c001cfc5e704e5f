//! Network messages - communication between App and Network layers

use serde_json::Value;

use crate::models::EndpointKey;
use crate::network::client::ApiError;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Fetch one endpoint; `id` identifies this attempt
    Fetch { id: u64, key: EndpointKey },

    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// A fetch settled, successfully or not
    Settled {
        id: u64,
        key: EndpointKey,
        outcome: Result<Value, ApiError>,
        time_ms: u64,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Settled { id, .. } => *id,
        }
    }

    pub fn key(&self) -> EndpointKey {
        match self {
            NetworkResponse::Settled { key, .. } => *key,
        }
    }
}
