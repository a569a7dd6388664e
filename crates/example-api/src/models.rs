//! Request and response shapes of the users API.
//!
//! Plain data: no behaviour beyond (de)serialization. Field names are
//! camelCase on the wire.

use serde::{Deserialize, Serialize};

/// A user as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Server-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// Creation date as reported by the server (e.g. `"2024-01-01"`).
    pub created_at: String,
}

/// Payload for creating a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRequest {
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
}

impl UserRequest {
    /// Builds a request from any string-like `name` and `email`.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}
