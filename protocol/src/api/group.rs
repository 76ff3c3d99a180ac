//! Group API DTOs
//!
//! Bodies for the group lifecycle: GET /classes/{id}/groups,
//! GET /classes/{id}/groups/my, POST /groups, PUT /groups/{id},
//! POST /groups/{id}/join, POST /groups/{id}/leave,
//! DELETE /groups/{id}/members/{userId}, POST /groups/{id}/leader.
//!
//! Join, leave, remove-member and change-leader take no request body
//! beyond what the path carries, except change-leader which names the
//! target member.

use serde::{Deserialize, Serialize};
use validator::Validate;

pub use crate::common::{Group, GroupMember, GroupRole};

/// Create group request for POST /groups
///
/// The creator becomes the group leader.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub class_id: i64,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// Group update request for PUT /groups/{id} (leader only)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// Leadership transfer request for POST /groups/{id}/leader
///
/// The target becomes leader; the current leader is demoted to member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLeaderRequest {
    pub user_id: i64,
}
