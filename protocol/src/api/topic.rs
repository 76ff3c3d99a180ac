//! Topic API DTOs
//!
//! Bodies for GET/POST /courses/{id}/topics and GET/PATCH/DELETE
//! /topics/{id}.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub use crate::common::Topic;

/// Create topic request for POST /courses/{id}/topics
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTopicRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(max = 10000))]
    pub description: Option<String>,
    pub due_date: NaiveDate,
    #[validate(range(min = 1, max = 480))]
    pub max_duration_minutes: u32,
    pub sequence_no: u32,
}

/// Partial topic update for PATCH /topics/{id}
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTopicRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 10000))]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 480))]
    pub max_duration_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_no: Option<u32>,
}
