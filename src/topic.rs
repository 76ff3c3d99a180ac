//! Topic operations for the OratorAI client
//!
//! Topics are assignments nested under a course for listing and creation,
//! flat for detail and mutation.

use reqwest::Method;

use orator_protocol::{CreateTopicRequest, PageQuery, Topic, UpdateTopicRequest};

use crate::client::{ApiClient, ApiResponse, Page};
use crate::error::Result;

/// Topic service
pub struct TopicService<'a, C: ApiClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: ApiClient + ?Sized> TopicService<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Fetch one page of a course's topics.
    pub async fn list_for_course(&self, course_id: i64, query: PageQuery) -> Result<Page<Topic>> {
        let endpoint = format!(
            "/courses/{}/topics?page={}&limit={}",
            course_id, query.page, query.limit
        );

        let response: ApiResponse<Vec<Topic>> = self
            .client
            .authenticated_request(Method::GET, &endpoint, None::<&()>)
            .await?;

        Ok(response.into())
    }

    pub async fn get(&self, id: i64) -> Result<Topic> {
        let endpoint = format!("/topics/{}", id);

        let response: ApiResponse<Topic> = self
            .client
            .authenticated_request(Method::GET, &endpoint, None::<&()>)
            .await?;

        response.require_data("topic")
    }

    pub async fn create(&self, course_id: i64, request: CreateTopicRequest) -> Result<Topic> {
        let endpoint = format!("/courses/{}/topics", course_id);

        let response: ApiResponse<Topic> = self
            .client
            .authenticated_request(Method::POST, &endpoint, Some(&request))
            .await?;

        response.require_data("topic")
    }

    pub async fn update(&self, id: i64, request: UpdateTopicRequest) -> Result<Topic> {
        let endpoint = format!("/topics/{}", id);

        let response: ApiResponse<Topic> = self
            .client
            .authenticated_request(Method::PATCH, &endpoint, Some(&request))
            .await?;

        response.require_data("topic")
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let endpoint = format!("/topics/{}", id);

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

    #[tokio::test]
    async fn test_list_is_scoped_to_course() {
        let client = create_client();
        let service = TopicService::new(&client);

        client.add_page_response(
            "/courses/4/topics?page=1&limit=20".to_string(),
            json!([sample_topic(1, 4)]),
            sample_pagination(1),
        );

        let page = service.list_for_course(4, PageQuery::default()).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].course_id, 4);
    }

    #[tokio::test]
    async fn test_create_posts_under_course() {
        let client = create_client();
        let service = TopicService::new(&client);

        client.add_response("/courses/4/topics".to_string(), json!(sample_topic(2, 4)));

        let request = CreateTopicRequest {
            title: "Persuasive speech".to_string(),
            description: None,
            due_date: NaiveDate::from_ymd_opt(2025, 11, 15).unwrap(),
            max_duration_minutes: 15,
            sequence_no: 2,
        };
        let topic = service.create(4, request).await.unwrap();
        assert_eq!(topic.id, 2);

        let requests = client.get_requests();
        assert_eq!(requests[0].endpoint, "/courses/4/topics");
    }

    #[tokio::test]
    async fn test_detail_uses_flat_path() {
        let client = create_client();
        let service = TopicService::new(&client);

        client.add_response("/topics/2".to_string(), json!(sample_topic(2, 4)));

        service.get(2).await.unwrap();

        let requests = client.get_requests();
        assert_eq!(requests[0].endpoint, "/topics/2");
    }
}
