//! Entity representations shared across endpoints
//!
//! These mirror what the backend returns inside the `data` field of its
//! response envelope. Ids are backend-assigned numeric identifiers; the
//! client never invents them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Users and roles
// ============================================================================

/// Platform role attached to a user account.
///
/// Roles gate which views and actions the client offers; the backend is the
/// authoritative access-control boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Instructor,
    Admin,
}

/// Full user representation as returned by auth and admin endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub roles: Vec<Role>,
}

impl User {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_instructor(&self) -> bool {
        self.has_role(Role::Instructor)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}

/// Compact user representation embedded in other entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
    pub full_name: String,
}

// ============================================================================
// Courses and topics
// ============================================================================

/// A course owned by one or more instructors.
///
/// Invariant: `start_date <= end_date`. The client validates this before
/// issuing create/update requests; the backend enforces it regardless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub semester: String,
    pub academic_year: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub instructors: Vec<UserSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An assignment within a course. Students enroll into topics individually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    /// Maximum presentation duration in minutes.
    pub max_duration_minutes: u32,
    /// Position of the topic within its course.
    pub sequence_no: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Classes
// ============================================================================

/// Lifecycle status of a class offering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassStatus {
    Active,
    Inactive,
    Archived,
}

/// A scheduled offering of a course with an enrollment capacity.
///
/// `enroll_key` is only present for instructors of the class; students
/// submit the key without ever seeing it here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: i64,
    pub course_id: i64,
    pub name: String,
    pub max_students: u32,
    pub enroll_key: Option<String>,
    /// Upper bound on group size for groups in this class, if set.
    pub max_group_members: Option<u32>,
    pub status: ClassStatus,
    #[serde(default)]
    pub instructors: Vec<UserSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Groups
// ============================================================================

/// Role of a member within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupRole {
    Leader,
    Member,
}

/// A user's membership record within a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    pub user: UserSummary,
    pub role: GroupRole,
    pub joined_at: DateTime<Utc>,
}

/// A student group within a class.
///
/// `my_role` is the requesting user's role in the group as derived by the
/// backend, or `None` when the user is not a member. It exists to drive UI
/// gating only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: i64,
    pub class_id: i64,
    pub name: String,
    pub leader: UserSummary,
    #[serde(default)]
    pub members: Vec<GroupMember>,
    pub member_count: u32,
    pub max_members: Option<u32>,
    pub my_role: Option<GroupRole>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Group {
    /// Whether the group cannot accept another member.
    pub fn is_full(&self) -> bool {
        match self.max_members {
            Some(max) => self.member_count >= max,
            None => false,
        }
    }
}

// ============================================================================
// Presentations
// ============================================================================

/// Server-side processing status of a presentation submission.
///
/// Progression is forward-only: draft, submitted, processing, analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationStatus {
    Draft,
    Submitted,
    Processing,
    Analyzed,
}

/// Metadata for a file attached to one of a presentation's upload slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationFile {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub uploaded_at: DateTime<Utc>,
}

/// A presentation submission created by a group leader under a
/// (class, topic) pair. Has exactly one slide slot and one media slot,
/// each with its own confirmation flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub id: i64,
    pub class_id: i64,
    pub topic_id: i64,
    pub group_id: i64,
    pub status: PresentationStatus,
    pub slide_file: Option<PresentationFile>,
    pub media_file: Option<PresentationFile>,
    pub slide_confirmed: bool,
    pub media_confirmed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Pagination
// ============================================================================

/// Server-supplied pagination metadata, stored verbatim by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

/// Standard query parameters for paginated list endpoints.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: 1, limit: 20 }
    }
}
