//! Course operations for the OratorAI client

use reqwest::Method;

use orator_protocol::{Course, CreateCourseRequest, PageQuery, UpdateCourseRequest};

use crate::client::{ApiClient, ApiResponse, Page};
use crate::error::{OratorError, Result};

/// Validate the course date window before any network call.
pub fn validate_date_window(
    start: chrono::NaiveDate,
    end: chrono::NaiveDate,
) -> Result<()> {
    if start > end {
        return Err(OratorError::validation(
            "Start date must be on or before end date",
        ));
    }
    Ok(())
}

/// Course service for catalog CRUD
pub struct CourseService<'a, C: ApiClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: ApiClient + ?Sized> CourseService<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Fetch one page of the course list.
    pub async fn list(&self, query: PageQuery) -> Result<Page<Course>> {
        let endpoint = format!("/courses?page={}&limit={}", query.page, query.limit);

        let response: ApiResponse<Vec<Course>> = self
            .client
            .authenticated_request(Method::GET, &endpoint, None::<&()>)
            .await?;

        Ok(response.into())
    }

    /// Fetch a single course by id.
    pub async fn get(&self, id: i64) -> Result<Course> {
        let endpoint = format!("/courses/{}", id);

        let response: ApiResponse<Course> = self
            .client
            .authenticated_request(Method::GET, &endpoint, None::<&()>)
            .await?;

        response.require_data("course")
    }

    /// Create a course. The created entity belongs at the head of the list.
    pub async fn create(&self, request: CreateCourseRequest) -> Result<Course> {
        validate_date_window(request.start_date, request.end_date)?;

        let response: ApiResponse<Course> = self
            .client
            .authenticated_request(Method::POST, "/courses", Some(&request))
            .await?;

        response.require_data("course")
    }

    /// Apply a partial update to a course.
    pub async fn update(&self, id: i64, request: UpdateCourseRequest) -> Result<Course> {
        if let (Some(start), Some(end)) = (request.start_date, request.end_date) {
            validate_date_window(start, end)?;
        }

        let endpoint = format!("/courses/{}", id);

        let response: ApiResponse<Course> = self
            .client
            .authenticated_request(Method::PATCH, &endpoint, Some(&request))
            .await?;

        response.require_data("course")
    }

    /// Delete a course.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let endpoint = format!("/courses/{}", id);

        let _response: ApiResponse<serde_json::Value> = self
            .client
            .authenticated_request(Method::DELETE, &endpoint, None::<&()>)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::tests::mocks::MockApiClient;
    use crate::tests::utils::test_helpers::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn create_client() -> MockApiClient {
        MockApiClient::new(ClientConfig::default())
            .with_auth(sample_instructor(100))
    }

    fn create_request() -> CreateCourseRequest {
        CreateCourseRequest {
            code: "ORA-101".to_string(),
            title: "Public Speaking".to_string(),
            description: None,
            semester: "Fall".to_string(),
            academic_year: "2025-2026".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 12, 19).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_list_returns_page_with_pagination() {
        let client = create_client();
        let service = CourseService::new(&client);

        client.add_page_response(
            "/courses?page=1&limit=20".to_string(),
            json!([sample_course(1), sample_course(2)]),
            sample_pagination(2),
        );

        let page = service.list(PageQuery::default()).await.unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination.unwrap().total, 2);
    }

    #[tokio::test]
    async fn test_create_rejects_inverted_date_window_before_network() {
        let client = create_client();
        let service = CourseService::new(&client);

        let mut request = create_request();
        request.start_date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();

        let result = service.create(request).await;
        assert!(result.is_err());
        assert!(
            client.get_requests().is_empty(),
            "validation failures must not reach the network"
        );
    }

    #[tokio::test]
    async fn test_create_returns_created_course() {
        let client = create_client();
        let service = CourseService::new(&client);

        client.add_response("/courses".to_string(), json!(sample_course(9)));

        let course = service.create(create_request()).await.unwrap();
        assert_eq!(course.id, 9);
    }

    #[tokio::test]
    async fn test_update_uses_patch() {
        let client = create_client();
        let service = CourseService::new(&client);

        client.add_response("/courses/3".to_string(), json!(sample_course(3)));

        let request = UpdateCourseRequest {
            title: Some("Rhetoric".to_string()),
            ..UpdateCourseRequest::default()
        };
        service.update(3, request).await.unwrap();

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::PATCH);
    }

    #[tokio::test]
    async fn test_delete_issues_delete() {
        let client = create_client();
        let service = CourseService::new(&client);

        client.add_response("/courses/3".to_string(), json!({}));

        service.delete(3).await.unwrap();

        let requests = client.get_requests();
        assert_eq!(requests[0].method, Method::DELETE);
        assert_eq!(requests[0].endpoint, "/courses/3");
    }

    #[tokio::test]
    async fn test_get_requires_data() {
        let client = create_client();
        let service = CourseService::new(&client);

        // Default mock response carries no data.
        let result = service.get(5).await;
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("No course in response"));
    }

    #[tokio::test]
    async fn test_api_error_is_surfaced() {
        let client = create_client();
        let service = CourseService::new(&client);

        client.add_error(
            "/courses/3".to_string(),
            OratorError::api(404, "Course not found".to_string()),
        );

        let err = service.get(3).await.unwrap_err();
        assert!(err.to_string().contains("Course not found"));
    }
}
