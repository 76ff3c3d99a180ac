//! HTTP client implementations for the OratorAI SDK

use reqwest::{Client, Method};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use orator_protocol::{Pagination, User};

use crate::auth::AuthClient;
use crate::config::ClientConfig;
use crate::error::{OratorError, Result};

/// API response envelope
///
/// Every backend response is `{success, data, message?, error?,
/// pagination?}`. The envelope is parsed strictly; a body that does not
/// match produces a typed invalid-response error rather than a guess
/// between alternative shapes.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub message: Option<String>,
    pub pagination: Option<Pagination>,
}

impl<T> ApiResponse<T> {
    /// Unwrap the `data` field, failing loudly when the backend omitted it.
    pub fn require_data(self, what: &str) -> Result<T> {
        self.data
            .ok_or_else(|| OratorError::invalid_response(format!("No {} in response", what)))
    }
}

/// One page of a listed collection together with the server-supplied
/// pagination metadata, stored verbatim.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
}

impl<T> From<ApiResponse<Vec<T>>> for Page<T> {
    fn from(response: ApiResponse<Vec<T>>) -> Self {
        Self {
            items: response.data.unwrap_or_default(),
            pagination: response.pagination,
        }
    }
}

/// Client seam used by all domain services.
///
/// Production code uses [`HttpClient`]; tests substitute a scripted mock.
pub trait ApiClient: Send + Sync {
    fn is_authenticated(&self) -> bool;

    fn current_user(&self) -> Option<User>;

    fn config(&self) -> ClientConfig;

    async fn authenticated_request<T, R>(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<&T>,
    ) -> Result<ApiResponse<R>>
    where
        T: Serialize + Send + Sync + 'static,
        R: DeserializeOwned + Send + 'static;

    async fn upload_file<R>(
        &self,
        endpoint: &str,
        part_name: &str,
        file_path: &Path,
        content_type: &str,
    ) -> Result<ApiResponse<R>>
    where
        R: DeserializeOwned + Send + 'static;
}

/// Suppresses duplicate concurrent dispatch of the same mutation.
///
/// Keyed by `METHOD endpoint`; a second identical mutation while the first
/// is still in flight is rejected client-side instead of reaching the
/// backend twice.
#[derive(Debug, Default, Clone)]
pub struct RequestGate {
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, method: &Method, endpoint: &str) -> Result<GateGuard> {
        let key = format!("{} {}", method, endpoint);
        let mut in_flight = self
            .in_flight
            .lock()
            .map_err(|_| OratorError::internal("Request gate poisoned"))?;

        if !in_flight.insert(key.clone()) {
            return Err(OratorError::duplicate_request(key));
        }

        Ok(GateGuard {
            key,
            in_flight: Arc::clone(&self.in_flight),
        })
    }
}

/// Releases the gate entry when the request completes, in both the success
/// and failure branches.
pub struct GateGuard {
    key: String,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl Drop for GateGuard {
    fn drop(&mut self) {
        if let Ok(mut in_flight) = self.in_flight.lock() {
            in_flight.remove(&self.key);
        }
    }
}

fn is_mutation(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

/// Parse a response body into the strict envelope, converting envelope
/// failures and unparseable bodies into typed errors.
fn parse_envelope<R>(status: reqwest::StatusCode, body: &str) -> Result<ApiResponse<R>>
where
    R: DeserializeOwned,
{
    match serde_json::from_str::<ApiResponse<R>>(body) {
        Ok(api_response) => {
            if !api_response.success {
                let error_message = api_response
                    .error
                    .or(api_response.message)
                    .unwrap_or_else(|| "Unknown API error".to_string());
                return Err(OratorError::api(status.as_u16(), error_message));
            }
            Ok(api_response)
        }
        Err(_) => Err(OratorError::api(
            status.as_u16(),
            format!("Invalid API response: {}", body),
        )),
    }
}

/// Extract the backend's error detail from a raw body, with a fallback.
fn extract_error_detail(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ApiResponse<serde_json::Value>>(body)
        .ok()
        .and_then(|r| r.error.or(r.message))
        .unwrap_or_else(|| fallback.to_string())
}

/// Base HTTP client for unauthenticated API operations
#[derive(Debug, Clone)]
pub struct BaseClient {
    pub(crate) client: Client,
    config: ClientConfig,
}

impl BaseClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut client_builder = Client::builder().timeout(Duration::from_secs(config.timeout));

        if !config.use_proxy {
            client_builder = client_builder.no_proxy();
        }

        let client = client_builder.build()?;

        Ok(Self { client, config })
    }

    pub async fn request<T, R>(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<&T>,
    ) -> Result<ApiResponse<R>>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let url = self.config.endpoint_url(endpoint);
        tracing::debug!(%method, %url, "request");

        let mut request_builder = self
            .client
            .request(method, &url)
            .header("Content-Type", "application/json");

        if let Some(data) = payload {
            request_builder = request_builder.json(data);
        }

        let response = request_builder.send().await?;
        let status = response.status();
        let response_text = response.text().await?;

        parse_envelope(status, &response_text)
    }

    pub async fn request_with_bearer<T, R>(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<&T>,
        bearer_token: &str,
    ) -> Result<ApiResponse<R>>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let url = self.config.endpoint_url(endpoint);
        tracing::debug!(%method, %url, "bearer request");

        let mut request_builder = self
            .client
            .request(method, &url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", bearer_token));

        if let Some(data) = payload {
            request_builder = request_builder.json(data);
        }

        let response = request_builder.send().await?;
        let status = response.status();
        let response_text = response.text().await?;

        parse_envelope(status, &response_text)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

/// HTTP client with authentication support
///
/// Wraps the base client with bearer-token injection from the current
/// session and gates mutating requests against duplicate dispatch.
#[derive(Debug)]
pub struct HttpClient {
    base_client: BaseClient,
    auth_client: Mutex<AuthClient>,
    gate: RequestGate,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_client = BaseClient::new(config.clone())?;
        let auth_client = AuthClient::new(config)?;
        Ok(Self {
            base_client,
            auth_client: Mutex::new(auth_client),
            gate: RequestGate::new(),
        })
    }

    fn lock_auth(&self) -> Result<std::sync::MutexGuard<'_, AuthClient>> {
        self.auth_client
            .lock()
            .map_err(|_| OratorError::internal("Auth client poisoned"))
    }

    pub async fn login(&self, email: String, password: String) -> Result<User> {
        let mut auth = {
            let guard = self.lock_auth()?;
            guard.clone()
        };
        let user = auth.login(email, password).await?;
        *self.lock_auth()? = auth;
        Ok(user)
    }

    pub async fn register(
        &self,
        full_name: String,
        email: String,
        password: String,
    ) -> Result<User> {
        let mut auth = {
            let guard = self.lock_auth()?;
            guard.clone()
        };
        let user = auth.register(full_name, email, password).await?;
        *self.lock_auth()? = auth;
        Ok(user)
    }

    pub async fn logout(&self) -> Result<()> {
        let mut auth = {
            let guard = self.lock_auth()?;
            guard.clone()
        };
        auth.logout().await?;
        *self.lock_auth()? = auth;
        Ok(())
    }

    fn bearer_token(&self) -> Result<String> {
        self.lock_auth()?.access_token().ok_or_else(|| {
            OratorError::session_not_found("Not logged in. Run `orator login` first.")
        })
    }
}

impl ApiClient for HttpClient {
    fn is_authenticated(&self) -> bool {
        self.lock_auth()
            .map(|auth| auth.is_authenticated())
            .unwrap_or(false)
    }

    fn current_user(&self) -> Option<User> {
        self.lock_auth().ok().and_then(|auth| auth.current_user())
    }

    fn config(&self) -> ClientConfig {
        self.base_client.config().clone()
    }

    async fn authenticated_request<T, R>(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<&T>,
    ) -> Result<ApiResponse<R>>
    where
        T: Serialize + Send + Sync + 'static,
        R: DeserializeOwned + Send + 'static,
    {
        let token = self.bearer_token()?;

        let _guard = if is_mutation(&method) {
            Some(self.gate.begin(&method, endpoint)?)
        } else {
            None
        };

        let url = self.base_client.config().endpoint_url(endpoint);
        tracing::debug!(%method, %url, "authenticated request");

        let mut request_builder = self
            .base_client
            .client
            .request(method, &url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", token));

        if let Some(data) = payload {
            request_builder = request_builder.json(data);
        }

        let response = request_builder.send().await?;
        let status = response.status();
        let response_text = response.text().await?;

        if status.as_u16() == 401 {
            let detail = extract_error_detail(&response_text, "Authentication failed");
            return Err(OratorError::authentication(detail));
        }

        if status.as_u16() == 403 {
            let detail = extract_error_detail(&response_text, "Insufficient permissions");
            return Err(OratorError::authorization(detail));
        }

        parse_envelope(status, &response_text)
    }

    async fn upload_file<R>(
        &self,
        endpoint: &str,
        part_name: &str,
        file_path: &Path,
        content_type: &str,
    ) -> Result<ApiResponse<R>>
    where
        R: DeserializeOwned + Send + 'static,
    {
        let token = self.bearer_token()?;
        let _guard = self.gate.begin(&Method::POST, endpoint)?;

        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        let bytes = tokio::fs::read(file_path)
            .await
            .map_err(|e| OratorError::io_from_error("Upload read", e))?;

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(content_type)
            .map_err(|e| OratorError::upload(format!("Invalid content type: {}", e)))?;
        let form = reqwest::multipart::Form::new().part(part_name.to_string(), part);

        let url = self.base_client.config().endpoint_url(endpoint);
        tracing::debug!(%url, "multipart upload");

        let response = self
            .base_client
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", token))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if status.as_u16() == 401 {
            let detail = extract_error_detail(&response_text, "Authentication failed");
            return Err(OratorError::authentication(detail));
        }

        if status.as_u16() == 403 {
            let detail = extract_error_detail(&response_text, "Insufficient permissions");
            return Err(OratorError::authorization(detail));
        }

        parse_envelope(status, &response_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_rejects_duplicate_mutation() {
        let gate = RequestGate::new();

        let first = gate.begin(&Method::POST, "/courses");
        assert!(first.is_ok());

        let second = gate.begin(&Method::POST, "/courses");
        assert!(matches!(
            second,
            Err(OratorError::DuplicateRequest { .. })
        ));
    }

    #[test]
    fn test_gate_releases_on_drop() {
        let gate = RequestGate::new();

        drop(gate.begin(&Method::POST, "/courses").unwrap());
        assert!(gate.begin(&Method::POST, "/courses").is_ok());
    }

    #[test]
    fn test_gate_distinguishes_endpoints() {
        let gate = RequestGate::new();

        let _a = gate.begin(&Method::POST, "/courses").unwrap();
        assert!(gate.begin(&Method::POST, "/classes").is_ok());
        assert!(gate.begin(&Method::DELETE, "/courses").is_ok());
    }

    #[test]
    fn test_parse_envelope_success_failure_flag() {
        let body = r#"{"success": false, "data": null, "message": "Course not found"}"#;
        let result = parse_envelope::<serde_json::Value>(reqwest::StatusCode::NOT_FOUND, body);

        match result {
            Err(OratorError::Api {
                status, message, ..
            }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Course not found");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_envelope_rejects_garbage() {
        let result = parse_envelope::<serde_json::Value>(reqwest::StatusCode::OK, "<html>");
        assert!(matches!(result, Err(OratorError::Api { .. })));
    }

    #[test]
    fn test_page_from_envelope_without_data() {
        let response: ApiResponse<Vec<i64>> = ApiResponse {
            success: true,
            data: None,
            error: None,
            message: None,
            pagination: None,
        };
        let page: Page<i64> = response.into();
        assert!(page.items.is_empty());
    }
}
