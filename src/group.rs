//! Group operations for the OratorAI client
//!
//! Group membership moves through three states: no-group, member, leader.
//! Every transition is a single REST call: create makes the caller
//! leader, join makes them a member, change-leader promotes a target and
//! demotes the current leader, remove-member and leave exit a member.
//! The `my_role` field on fetched groups gates which actions the client
//! offers, but the backend remains the authority; concurrent transitions
//! (two members racing for leadership) resolve server-side and the loser
//! sees the rejection message verbatim.

use reqwest::Method;

use orator_protocol::{ChangeLeaderRequest, CreateGroupRequest, Group, UpdateGroupRequest};

use crate::client::{ApiClient, ApiResponse};
use crate::error::{OratorError, Result};

/// Group service
pub struct GroupService<'a, C: ApiClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: ApiClient + ?Sized> GroupService<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Fetch the full group roster of a class.
    pub async fn list_for_class(&self, class_id: i64) -> Result<Vec<Group>> {
        let endpoint = format!("/classes/{}/groups", class_id);

        let response: ApiResponse<Vec<Group>> = self
            .client
            .authenticated_request(Method::GET, &endpoint, None::<&()>)
            .await?;

        Ok(response.data.unwrap_or_default())
    }

    /// Resolve the current user's group within a class, if any.
    pub async fn my_group(&self, class_id: i64) -> Result<Option<Group>> {
        let endpoint = format!("/classes/{}/groups/my", class_id);

        let response: ApiResponse<Group> = self
            .client
            .authenticated_request(Method::GET, &endpoint, None::<&()>)
            .await?;

        Ok(response.data)
    }

    /// Create a group. The creator becomes its leader.
    pub async fn create(&self, request: CreateGroupRequest) -> Result<Group> {
        if request.name.trim().is_empty() {
            return Err(OratorError::validation_field(
                "Group name is required",
                "name",
            ));
        }

        let response: ApiResponse<Group> = self
            .client
            .authenticated_request(Method::POST, "/groups", Some(&request))
            .await?;

        response.require_data("group")
    }

    /// Rename a group (leader only, enforced server-side).
    pub async fn update(&self, group_id: i64, request: UpdateGroupRequest) -> Result<Group> {
        let endpoint = format!("/groups/{}", group_id);

        let response: ApiResponse<Group> = self
            .client
            .authenticated_request(Method::PUT, &endpoint, Some(&request))
            .await?;

        response.require_data("group")
    }

    /// Join a group as a member.
    ///
    /// A group already at capacity is blocked here without a request; a
    /// race against the last free seat still resolves server-side.
    pub async fn join(&self, group: &Group) -> Result<Group> {
        if group.is_full() {
            return Err(OratorError::group_full(format!(
                "Group '{}' is already at maximum capacity",
                group.name
            )));
        }

        let endpoint = format!("/groups/{}/join", group.id);

        let response: ApiResponse<Group> = self
            .client
            .authenticated_request(Method::POST, &endpoint, None::<&()>)
            .await?;

        response.require_data("group")
    }

    /// Leave the group, returning to the no-group state.
    pub async fn leave(&self, group_id: i64) -> Result<()> {
        let endpoint = format!("/groups/{}/leave", group_id);

        let _response: ApiResponse<serde_json::Value> = self
            .client
            .authenticated_request(Method::POST, &endpoint, None::<&()>)
            .await?;

        Ok(())
    }

    /// Remove a member from the group (leader only, enforced server-side).
    pub async fn remove_member(&self, group_id: i64, user_id: i64) -> Result<Group> {
        let endpoint = format!("/groups/{}/members/{}", group_id, user_id);

        let response: ApiResponse<Group> = self
            .client
            .authenticated_request(Method::DELETE, &endpoint, None::<&()>)
            .await?;

        response.require_data("group")
    }

    /// Transfer leadership to another member; the current leader becomes a
    /// member.
    pub async fn change_leader(&self, group_id: i64, user_id: i64) -> Result<Group> {
        let endpoint = format!("/groups/{}/leader", group_id);
        let request = ChangeLeaderRequest { user_id };

        let response: ApiResponse<Group> = self
            .client
            .authenticated_request(Method::POST, &endpoint, Some(&request))
            .await?;

        response.require_data("group")
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
            .with_auth(sample_user(1, "student@university.edu"))
    }

    #[tokio::test]
    async fn test_join_blocked_at_capacity_without_request() {
        let client = create_client();
        let service = GroupService::new(&client);

        let full_group = sample_group(5, 1, 4, Some(4));

        let err = service.join(&full_group).await.unwrap_err();
        assert!(err.to_string().contains("maximum capacity"));
        assert!(
            client.get_requests().is_empty(),
            "capacity check must run before any network call"
        );
    }

    #[tokio::test]
    async fn test_join_allowed_below_capacity() {
        let client = create_client();
        let service = GroupService::new(&client);

        let group = sample_group(5, 1, 3, Some(4));
        client.add_response(
            "/groups/5/join".to_string(),
            json!(sample_group(5, 1, 4, Some(4))),
        );

        let joined = service.join(&group).await.unwrap();
        assert_eq!(joined.member_count, 4);
    }

    #[tokio::test]
    async fn test_join_unbounded_group_is_never_full() {
        let client = create_client();
        let service = GroupService::new(&client);

        let group = sample_group(5, 1, 12, None);
        client.add_response(
            "/groups/5/join".to_string(),
            json!(sample_group(5, 1, 13, None)),
        );

        assert!(service.join(&group).await.is_ok());
    }

    #[tokio::test]
    async fn test_join_race_surfaces_backend_rejection() {
        let client = create_client();
        let service = GroupService::new(&client);

        // Capacity looked fine client-side, but the last seat went to
        // someone else.
        let group = sample_group(5, 1, 3, Some(4));
        client.add_error(
            "/groups/5/join".to_string(),
            OratorError::api(409, "Group is full".to_string()),
        );

        let err = service.join(&group).await.unwrap_err();
        assert!(err.to_string().contains("Group is full"));
    }

    #[tokio::test]
    async fn test_my_group_absent_is_none() {
        let client = create_client();
        let service = GroupService::new(&client);

        // Default mock response carries no data.
        let result = service.my_group(1).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let client = create_client();
        let service = GroupService::new(&client);

        let request = CreateGroupRequest {
            class_id: 1,
            name: "   ".to_string(),
        };

        assert!(service.create(request).await.is_err());
        assert!(client.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_change_leader_posts_target() {
        let client = create_client();
        let service = GroupService::new(&client);

        client.add_response(
            "/groups/5/leader".to_string(),
            json!(sample_group(5, 1, 3, Some(4))),
        );

        service.change_leader(5, 2).await.unwrap();

        let requests = client.get_requests();
        assert_eq!(requests[0].endpoint, "/groups/5/leader");
        assert_eq!(requests[0].payload.as_ref().unwrap()["userId"], 2);
    }

    #[tokio::test]
    async fn test_remove_member_deletes_by_path() {
        let client = create_client();
        let service = GroupService::new(&client);

        client.add_response(
            "/groups/5/members/2".to_string(),
            json!(sample_group(5, 1, 2, Some(4))),
        );

        service.remove_member(5, 2).await.unwrap();

        let requests = client.get_requests();
        assert_eq!(requests[0].method, Method::DELETE);
        assert_eq!(requests[0].endpoint, "/groups/5/members/2");
    }
}
