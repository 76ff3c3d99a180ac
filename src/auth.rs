//! Authentication for the OratorAI SDK
//!
//! Session lifecycle: login/register exchange credentials for a bearer
//! token plus the user object, both persisted to the session store and
//! restored on client construction. Logout clears memory and durable
//! storage unconditionally; the server-side revoke is best effort.

use reqwest::Method;

use orator_protocol::{LoginRequest, LoginResponse, RegisterRequest, User};

use crate::client::{ApiResponse, BaseClient};
use crate::config::ClientConfig;
use crate::error::{OratorError, Result};
use crate::session::{SessionStore, SessionStoreConfig, StoredSession};

/// Authentication client
#[derive(Debug, Clone)]
pub struct AuthClient {
    base_client: BaseClient,
    user: Option<User>,
    token: Option<String>,
    session_store: Option<SessionStore>,
}

impl AuthClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_client = BaseClient::new(config.clone())?;

        let session_store = if config.session_storage.enabled {
            let store_config: SessionStoreConfig = config.session_storage.into();
            Some(SessionStore::new(store_config)?)
        } else {
            None
        };

        let mut auth_client = Self {
            base_client,
            user: None,
            token: None,
            session_store,
        };

        if auth_client.session_store.is_some() {
            auth_client.load_available_session();
        }

        Ok(auth_client)
    }

    pub async fn login(&mut self, email: String, password: String) -> Result<User> {
        let email = email.trim().to_string();
        if email.is_empty() {
            return Err(OratorError::validation_field("Email is required", "email"));
        }
        if password.is_empty() {
            return Err(OratorError::validation_field(
                "Password is required",
                "password",
            ));
        }

        let request = LoginRequest { email, password };

        let response: ApiResponse<LoginResponse> = self
            .base_client
            .request(Method::POST, "/auth/login", Some(&request))
            .await?;

        let data = response
            .data
            .ok_or_else(|| OratorError::authentication("No data in login response"))?;

        self.adopt_session(data)
    }

    pub async fn register(
        &mut self,
        full_name: String,
        email: String,
        password: String,
    ) -> Result<User> {
        let full_name = full_name.trim().to_string();
        let email = email.trim().to_string();
        if full_name.is_empty() {
            return Err(OratorError::validation_field("Name is required", "fullName"));
        }
        if email.is_empty() {
            return Err(OratorError::validation_field("Email is required", "email"));
        }
        if password.len() < 8 {
            return Err(OratorError::validation_field(
                "Password must be at least 8 characters",
                "password",
            ));
        }

        let request = RegisterRequest {
            full_name,
            email,
            password,
        };

        let response: ApiResponse<LoginResponse> = self
            .base_client
            .request(Method::POST, "/auth/register", Some(&request))
            .await?;

        let data = response
            .data
            .ok_or_else(|| OratorError::authentication("No data in registration response"))?;

        self.adopt_session(data)
    }

    fn adopt_session(&mut self, data: LoginResponse) -> Result<User> {
        if data.token.trim().is_empty() {
            return Err(OratorError::authentication("Empty token in response"));
        }

        self.token = Some(data.token);
        self.user = Some(data.user.clone());
        self.store_current_session()?;

        Ok(data.user)
    }

    pub async fn logout(&mut self) -> Result<()> {
        if let Some(token) = self.token.clone() {
            // Best effort: local logout proceeds even when the server is
            // unreachable.
            let revoke: Result<ApiResponse<serde_json::Value>> = self
                .base_client
                .request_with_bearer(Method::POST, "/auth/logout", None::<&()>, &token)
                .await;
            if let Err(e) = revoke {
                tracing::warn!("Server-side logout failed: {}", e);
            }
        }

        if let Some(store) = &mut self.session_store {
            store.remove_session()?;
        }

        self.clear_session();
        Ok(())
    }

    pub fn access_token(&self) -> Option<String> {
        self.token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn current_user(&self) -> Option<User> {
        self.user.clone().or_else(|| {
            self.session_store
                .as_ref()
                .and_then(|store| store.get_session())
                .map(|s| s.user)
        })
    }

    pub fn clear_session(&mut self) {
        self.user = None;
        self.token = None;
    }

    pub fn config(&self) -> &ClientConfig {
        self.base_client.config()
    }

    pub fn load_available_session(&mut self) {
        if let Some(store) = &mut self.session_store {
            if let Some(stored) = store.get_session() {
                // A stored session with a blank token is useless; drop it.
                if !stored.token.trim().is_empty() {
                    self.user = Some(stored.user);
                    self.token = Some(stored.token);
                }
            }
        }
    }

    fn store_current_session(&mut self) -> Result<()> {
        if let Some(store) = &mut self.session_store {
            if let (Some(user), Some(token)) = (&self.user, &self.token) {
                let stored = StoredSession {
                    user: user.clone(),
                    token: token.clone(),
                    created_at: chrono::Utc::now(),
                    updated_at: chrono::Utc::now(),
                };
                store.store_session(stored)?;
            }
        }
        Ok(())
    }
}
