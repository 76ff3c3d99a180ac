//! Class operations for the OratorAI client
//!
//! Classes are scheduled offerings of a course. Unlike the course
//! endpoints, update is a whole-resource PUT, and classes carry the
//! instructor-assignment mutations.

use reqwest::Method;

use orator_protocol::{
    AssignInstructorRequest, Class, CreateClassRequest, PageQuery, UpdateClassRequest,
};

use crate::client::{ApiClient, ApiResponse, Page};
use crate::error::{OratorError, Result};

/// Class service
pub struct ClassService<'a, C: ApiClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: ApiClient + ?Sized> ClassService<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: PageQuery) -> Result<Page<Class>> {
        let endpoint = format!("/classes?page={}&limit={}", query.page, query.limit);

        let response: ApiResponse<Vec<Class>> = self
            .client
            .authenticated_request(Method::GET, &endpoint, None::<&()>)
            .await?;

        Ok(response.into())
    }

    pub async fn get(&self, id: i64) -> Result<Class> {
        let endpoint = format!("/classes/{}", id);

        let response: ApiResponse<Class> = self
            .client
            .authenticated_request(Method::GET, &endpoint, None::<&()>)
            .await?;

        response.require_data("class")
    }

    pub async fn create(&self, request: CreateClassRequest) -> Result<Class> {
        if request.max_students == 0 {
            return Err(OratorError::validation_field(
                "Capacity must be at least 1",
                "maxStudents",
            ));
        }

        let response: ApiResponse<Class> = self
            .client
            .authenticated_request(Method::POST, "/classes", Some(&request))
            .await?;

        response.require_data("class")
    }

    pub async fn update(&self, id: i64, request: UpdateClassRequest) -> Result<Class> {
        if request.max_students == 0 {
            return Err(OratorError::validation_field(
                "Capacity must be at least 1",
                "maxStudents",
            ));
        }

        let endpoint = format!("/classes/{}", id);

        let response: ApiResponse<Class> = self
            .client
            .authenticated_request(Method::PUT, &endpoint, Some(&request))
            .await?;

        response.require_data("class")
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let endpoint = format!("/classes/{}", id);

        let _response: ApiResponse<serde_json::Value> = self
            .client
            .authenticated_request(Method::DELETE, &endpoint, None::<&()>)
            .await?;

        Ok(())
    }

    /// Assign an instructor to a class.
    pub async fn assign_instructor(&self, class_id: i64, user_id: i64) -> Result<Class> {
        let endpoint = format!("/classes/{}/instructors", class_id);
        let request = AssignInstructorRequest { user_id };

        let response: ApiResponse<Class> = self
            .client
            .authenticated_request(Method::POST, &endpoint, Some(&request))
            .await?;

        response.require_data("class")
    }

    /// Remove an instructor assignment from a class.
    pub async fn remove_instructor(&self, class_id: i64, user_id: i64) -> Result<Class> {
        let endpoint = format!("/classes/{}/instructors/{}", class_id, user_id);

        let response: ApiResponse<Class> = self
            .client
            .authenticated_request(Method::DELETE, &endpoint, None::<&()>)
            .await?;

        response.require_data("class")
    }
}
