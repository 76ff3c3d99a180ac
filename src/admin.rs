//! User administration operations for the OratorAI client
//!
//! Admin-gated server-side; the CLI only hides these commands behind the
//! session role as a convenience.

use reqwest::Method;

use orator_protocol::{PageQuery, Role, UpdateUserRolesRequest, User};

use crate::client::{ApiClient, ApiResponse, Page};
use crate::error::{OratorError, Result};

/// Admin user service
pub struct AdminService<'a, C: ApiClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: ApiClient + ?Sized> AdminService<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn list_users(&self, query: PageQuery) -> Result<Page<User>> {
        let endpoint = format!("/admin/users?page={}&limit={}", query.page, query.limit);

        let response: ApiResponse<Vec<User>> = self
            .client
            .authenticated_request(Method::GET, &endpoint, None::<&()>)
            .await?;

        Ok(response.into())
    }

    /// Replace a user's role set.
    pub async fn update_roles(&self, user_id: i64, roles: Vec<Role>) -> Result<User> {
        if roles.is_empty() {
            return Err(OratorError::validation_field(
                "A user needs at least one role",
                "roles",
            ));
        }

        let endpoint = format!("/admin/users/{}", user_id);
        let request = UpdateUserRolesRequest { roles };

        let response: ApiResponse<User> = self
            .client
            .authenticated_request(Method::PATCH, &endpoint, Some(&request))
            .await?;

        response.require_data("user")
    }

    pub async fn delete_user(&self, user_id: i64) -> Result<()> {
        let endpoint = format!("/admin/users/{}", user_id);

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
    use serde_json::json;

    fn create_client() -> MockApiClient {
        let mut admin = sample_user(999, "admin@university.edu");
        admin.roles = vec![Role::Admin];
        MockApiClient::new(ClientConfig::default()).with_auth(admin)
    }

    #[tokio::test]
    async fn test_list_users_paginates() {
        let client = create_client();
        let service = AdminService::new(&client);

        client.add_page_response(
            "/admin/users?page=2&limit=50".to_string(),
            json!([sample_user(1, "a@university.edu")]),
            sample_pagination(51),
        );

        let page = service
            .list_users(PageQuery { page: 2, limit: 50 })
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.pagination.unwrap().total, 51);
    }

    #[tokio::test]
    async fn test_update_roles_rejects_empty_set() {
        let client = create_client();
        let service = AdminService::new(&client);

        assert!(service.update_roles(1, vec![]).await.is_err());
        assert!(client.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_update_roles_patches_user() {
        let client = create_client();
        let service = AdminService::new(&client);

        client.add_response(
            "/admin/users/1".to_string(),
            json!(sample_instructor(1)),
        );

        service
            .update_roles(1, vec![Role::Instructor])
            .await
            .unwrap();

        let requests = client.get_requests();
        assert_eq!(requests[0].method, Method::PATCH);
        assert_eq!(
            requests[0].payload.as_ref().unwrap()["roles"],
            json!(["instructor"])
        );
    }
}
