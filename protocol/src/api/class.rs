//! Class API DTOs
//!
//! Bodies for GET/POST /classes, PUT/DELETE /classes/{id} and the
//! instructor-assignment endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

pub use crate::common::{Class, ClassStatus};

/// Create class request for POST /classes
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassRequest {
    pub course_id: i64,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(range(min = 1))]
    pub max_students: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 4, max = 64))]
    pub enroll_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub max_group_members: Option<u32>,
}

/// Full class update for PUT /classes/{id}
///
/// Unlike courses, the class endpoint replaces the whole resource.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(range(min = 1))]
    pub max_students: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 4, max = 64))]
    pub enroll_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub max_group_members: Option<u32>,
    pub status: ClassStatus,
}

/// Instructor assignment request for POST /classes/{id}/instructors
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignInstructorRequest {
    pub user_id: i64,
}
