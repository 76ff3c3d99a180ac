//! Enrollment API DTOs
//!
//! Bodies for POST/DELETE /enrollments/courses/{id},
//! /enrollments/topics/{id} and POST /enrollments/classes/{id}.
//! The GET variants return flat id-lists for O(1) membership checks.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Key-based class enrollment request for POST /enrollments/classes/{id}
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EnrollByKeyRequest {
    #[validate(length(min = 1, max = 64))]
    pub enroll_key: String,
}

/// Id-list response for GET /enrollments/{courses|topics|classes}
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledIdsResponse {
    pub ids: Vec<i64>,
}
