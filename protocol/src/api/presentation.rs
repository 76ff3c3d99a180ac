//! Presentation API DTOs
//!
//! Bodies for POST /presentations, the slot upload/confirm endpoints
//! (POST /presentations/{id}/slides, /media, and their /confirm
//! variants), POST /presentations/{id}/submit and
//! GET /groups/{id}/presentations.
//!
//! Slot uploads are multipart requests; their responses return the
//! updated presentation, as do confirm and submit.

use serde::{Deserialize, Serialize};

pub use crate::common::{Presentation, PresentationFile, PresentationStatus};

/// Create presentation request for POST /presentations
///
/// Only the group leader may create a presentation; the backend enforces
/// this and the client merely surfaces the rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePresentationRequest {
    pub class_id: i64,
    pub topic_id: i64,
    pub group_id: i64,
}
