//! Authentication-related common types

use serde::{Deserialize, Serialize};

use crate::common::User;

/// Login response containing the bearer token and the authenticated user.
///
/// The token is opaque to the client; it is persisted alongside the user
/// object and attached to every subsequent request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}
