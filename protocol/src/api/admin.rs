//! Admin API DTOs
//!
//! Bodies for GET /admin/users, PATCH /admin/users/{id} and
//! DELETE /admin/users/{id}.

use serde::{Deserialize, Serialize};

pub use crate::common::{Role, User};

/// Role replacement request for PATCH /admin/users/{id}
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRolesRequest {
    pub roles: Vec<Role>,
}
