//! Enrollment operations for the OratorAI client
//!
//! Enrollments are join-relations between the current student and
//! courses, topics or classes. The client keeps them as flat id-lists
//! (see `state::EnrollmentState`) and resynchronizes by refetching the
//! relevant list after every enroll/drop.

use reqwest::Method;

use orator_protocol::{EnrollByKeyRequest, EnrolledIdsResponse};

use crate::client::{ApiClient, ApiResponse};
use crate::error::{OratorError, Result};

/// Enrollment service
pub struct EnrollmentService<'a, C: ApiClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: ApiClient + ?Sized> EnrollmentService<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn enroll_course(&self, course_id: i64) -> Result<()> {
        let endpoint = format!("/enrollments/courses/{}", course_id);

        let _response: ApiResponse<serde_json::Value> = self
            .client
            .authenticated_request(Method::POST, &endpoint, None::<&()>)
            .await?;

        Ok(())
    }

    pub async fn drop_course(&self, course_id: i64) -> Result<()> {
        let endpoint = format!("/enrollments/courses/{}", course_id);

        let _response: ApiResponse<serde_json::Value> = self
            .client
            .authenticated_request(Method::DELETE, &endpoint, None::<&()>)
            .await?;

        Ok(())
    }

    pub async fn enroll_topic(&self, topic_id: i64) -> Result<()> {
        let endpoint = format!("/enrollments/topics/{}", topic_id);

        let _response: ApiResponse<serde_json::Value> = self
            .client
            .authenticated_request(Method::POST, &endpoint, None::<&()>)
            .await?;

        Ok(())
    }

    pub async fn drop_topic(&self, topic_id: i64) -> Result<()> {
        let endpoint = format!("/enrollments/topics/{}", topic_id);

        let _response: ApiResponse<serde_json::Value> = self
            .client
            .authenticated_request(Method::DELETE, &endpoint, None::<&()>)
            .await?;

        Ok(())
    }

    /// Self-enroll into a class with the instructor-distributed key.
    ///
    /// The only client-side check is non-emptiness; key verification is
    /// the backend's.
    pub async fn enroll_class_by_key(&self, class_id: i64, enroll_key: &str) -> Result<()> {
        let enroll_key = enroll_key.trim();
        if enroll_key.is_empty() {
            return Err(OratorError::validation_field(
                "Enroll key is required",
                "enrollKey",
            ));
        }

        let endpoint = format!("/enrollments/classes/{}", class_id);
        let request = EnrollByKeyRequest {
            enroll_key: enroll_key.to_string(),
        };

        let _response: ApiResponse<serde_json::Value> = self
            .client
            .authenticated_request(Method::POST, &endpoint, Some(&request))
            .await?;

        Ok(())
    }

    pub async fn fetch_enrolled_courses(&self) -> Result<Vec<i64>> {
        self.fetch_ids("/enrollments/courses").await
    }

    pub async fn fetch_enrolled_topics(&self) -> Result<Vec<i64>> {
        self.fetch_ids("/enrollments/topics").await
    }

    pub async fn fetch_enrolled_classes(&self) -> Result<Vec<i64>> {
        self.fetch_ids("/enrollments/classes").await
    }

    async fn fetch_ids(&self, endpoint: &str) -> Result<Vec<i64>> {
        let response: ApiResponse<EnrolledIdsResponse> = self
            .client
            .authenticated_request(Method::GET, endpoint, None::<&()>)
            .await?;

        Ok(response.data.map(|d| d.ids).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::state::EnrollmentState;
    use crate::tests::mocks::MockApiClient;
    use crate::tests::utils::test_helpers::sample_user;
    use serde_json::json;

    fn create_client() -> MockApiClient {
        MockApiClient::new(ClientConfig::default())
            .with_auth(sample_user(1, "student@university.edu"))
    }

    #[tokio::test]
    async fn test_enroll_topic_then_fetch_contains_id() {
        let client = create_client();
        let service = EnrollmentService::new(&client);

        client.add_response("/enrollments/topics/42".to_string(), json!({}));
        client.add_response("/enrollments/topics".to_string(), json!({ "ids": [42] }));

        service.enroll_topic(42).await.unwrap();

        let mut state = EnrollmentState::new();
        state.set_topic_ids(service.fetch_enrolled_topics().await.unwrap());

        assert!(state.has_topic(42));
    }

    #[tokio::test]
    async fn test_drop_course_removes_id_locally_on_success() {
        let client = create_client();
        let service = EnrollmentService::new(&client);

        client.add_response("/enrollments/courses/7".to_string(), json!({}));

        let mut state = EnrollmentState::new();
        state.set_course_ids(vec![7, 8]);

        service.drop_course(7).await.unwrap();
        state.remove_course(7);

        assert!(!state.has_course(7));
        assert!(state.has_course(8));
    }

    #[tokio::test]
    async fn test_enroll_class_requires_key() {
        let client = create_client();
        let service = EnrollmentService::new(&client);

        let err = service.enroll_class_by_key(3, "  ").await.unwrap_err();
        assert!(err.to_string().contains("Enroll key is required"));
        assert!(client.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_enroll_class_sends_trimmed_key() {
        let client = create_client();
        let service = EnrollmentService::new(&client);

        client.add_response("/enrollments/classes/3".to_string(), json!({}));

        service.enroll_class_by_key(3, " fall-2025 ").await.unwrap();

        let requests = client.get_requests();
        assert_eq!(
            requests[0].payload.as_ref().unwrap()["enrollKey"],
            "fall-2025"
        );
    }

    #[tokio::test]
    async fn test_invalid_key_rejection_is_surfaced() {
        let client = create_client();
        let service = EnrollmentService::new(&client);

        client.add_error(
            "/enrollments/classes/3".to_string(),
            OratorError::api(403, "Invalid enroll key".to_string()),
        );

        let err = service.enroll_class_by_key(3, "wrong").await.unwrap_err();
        assert!(err.to_string().contains("Invalid enroll key"));
    }

    #[tokio::test]
    async fn test_fetch_without_data_yields_empty_list() {
        let client = create_client();
        let service = EnrollmentService::new(&client);

        let ids = service.fetch_enrolled_courses().await.unwrap();
        assert!(ids.is_empty());
    }
}
