//! Presentation operations for the OratorAI client
//!
//! A presentation is created as a draft by the group leader under a
//! (class, topic) pair, carries one slide slot and one media slot, and is
//! submitted for AI grading once both slots are confirmed. File
//! validation (allow-listed types, 500MB cap) runs before any network
//! I/O.

use std::path::Path;

use reqwest::Method;

use orator_protocol::{CreatePresentationRequest, Presentation};

use crate::client::{ApiClient, ApiResponse};
use crate::error::Result;
use crate::utils;

/// Presentation service
pub struct PresentationService<'a, C: ApiClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: ApiClient + ?Sized> PresentationService<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Create a draft presentation (leader only, enforced server-side).
    pub async fn create(&self, request: CreatePresentationRequest) -> Result<Presentation> {
        let response: ApiResponse<Presentation> = self
            .client
            .authenticated_request(Method::POST, "/presentations", Some(&request))
            .await?;

        response.require_data("presentation")
    }

    pub async fn get(&self, id: i64) -> Result<Presentation> {
        let endpoint = format!("/presentations/{}", id);

        let response: ApiResponse<Presentation> = self
            .client
            .authenticated_request(Method::GET, &endpoint, None::<&()>)
            .await?;

        response.require_data("presentation")
    }

    /// List a group's presentations.
    pub async fn list_for_group(&self, group_id: i64) -> Result<Vec<Presentation>> {
        let endpoint = format!("/groups/{}/presentations", group_id);

        let response: ApiResponse<Vec<Presentation>> = self
            .client
            .authenticated_request(Method::GET, &endpoint, None::<&()>)
            .await?;

        Ok(response.data.unwrap_or_default())
    }

    /// Upload the slide document. Fails fast on type or size before any
    /// network call.
    pub async fn upload_slide(&self, id: i64, file_path: &Path) -> Result<Presentation> {
        let content_type = utils::slide_content_type(file_path)?;
        utils::validate_upload_size(file_path).await?;

        let endpoint = format!("/presentations/{}/slides", id);

        let response: ApiResponse<Presentation> = self
            .client
            .upload_file(&endpoint, "slide", file_path, content_type)
            .await?;

        response.require_data("presentation")
    }

    /// Upload the media recording. Fails fast on type or size before any
    /// network call.
    pub async fn upload_media(&self, id: i64, file_path: &Path) -> Result<Presentation> {
        let content_type = utils::media_content_type(file_path)?;
        utils::validate_upload_size(file_path).await?;

        let endpoint = format!("/presentations/{}/media", id);

        let response: ApiResponse<Presentation> = self
            .client
            .upload_file(&endpoint, "media", file_path, content_type)
            .await?;

        response.require_data("presentation")
    }

    pub async fn confirm_slide(&self, id: i64) -> Result<Presentation> {
        let endpoint = format!("/presentations/{}/slides/confirm", id);

        let response: ApiResponse<Presentation> = self
            .client
            .authenticated_request(Method::POST, &endpoint, None::<&()>)
            .await?;

        response.require_data("presentation")
    }

    pub async fn confirm_media(&self, id: i64) -> Result<Presentation> {
        let endpoint = format!("/presentations/{}/media/confirm", id);

        let response: ApiResponse<Presentation> = self
            .client
            .authenticated_request(Method::POST, &endpoint, None::<&()>)
            .await?;

        response.require_data("presentation")
    }

    /// Submit the presentation for processing.
    ///
    /// Callers go through `upload::UploadFlow::submit`, which enforces the
    /// both-slots-confirmed precondition client-side.
    pub async fn submit(&self, id: i64) -> Result<Presentation> {
        let endpoint = format!("/presentations/{}/submit", id);

        let response: ApiResponse<Presentation> = self
            .client
            .authenticated_request(Method::POST, &endpoint, None::<&()>)
            .await?;

        response.require_data("presentation")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::tests::mocks::MockApiClient;
    use crate::tests::utils::test_helpers::*;
    use serde_json::json;

    fn create_client() -> MockApiClient {
        MockApiClient::new(ClientConfig::default())
            .with_auth(sample_user(1, "leader@university.edu"))
    }

    #[tokio::test]
    async fn test_create_posts_triple() {
        let client = create_client();
        let service = PresentationService::new(&client);

        client.add_response("/presentations".to_string(), presentation_json(9, 5));

        let request = CreatePresentationRequest {
            class_id: 1,
            topic_id: 2,
            group_id: 5,
        };
        let presentation = service.create(request).await.unwrap();
        assert_eq!(presentation.id, 9);

        let payload = client.get_requests()[0].payload.clone().unwrap();
        assert_eq!(payload["classId"], 1);
        assert_eq!(payload["topicId"], 2);
        assert_eq!(payload["groupId"], 5);
    }

    #[tokio::test]
    async fn test_upload_slide_rejects_wrong_type_before_network() {
        let client = create_client();
        let service = PresentationService::new(&client);

        let dir = create_temp_dir();
        let path = create_temp_file_with_content(&dir, "talk.mp4", b"video");

        let err = service.upload_slide(9, &path).await.unwrap_err();
        assert!(err.to_string().contains("Unsupported slide file type"));
        assert!(client.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_upload_media_rejects_wrong_type_before_network() {
        let client = create_client();
        let service = PresentationService::new(&client);

        let dir = create_temp_dir();
        let path = create_temp_file_with_content(&dir, "deck.pdf", b"%PDF-1.7");

        let err = service.upload_media(9, &path).await.unwrap_err();
        assert!(err.to_string().contains("Unsupported media file type"));
        assert!(client.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_upload_slide_sends_multipart_with_content_type() {
        let client = create_client();
        let service = PresentationService::new(&client);

        let dir = create_temp_dir();
        let path = create_temp_file_with_content(&dir, "deck.pdf", b"%PDF-1.7");

        client.add_response(
            "/presentations/9/slides".to_string(),
            presentation_json(9, 5),
        );

        service.upload_slide(9, &path).await.unwrap();

        let requests = client.get_requests();
        assert_eq!(requests[0].endpoint, "/presentations/9/slides");
        let payload = requests[0].payload.as_ref().unwrap();
        assert_eq!(payload["part"], "slide");
        assert_eq!(payload["contentType"], "application/pdf");
    }
}
