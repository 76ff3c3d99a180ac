//! Mock implementations for testing

use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex};

use orator_protocol::{Pagination, User};

use crate::client::{ApiClient, ApiResponse};
use crate::config::ClientConfig;
use crate::error::{OratorError, Result};

/// A request observed by the mock, for assertions on what reached (or did
/// not reach) the network.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub endpoint: String,
    pub payload: Option<serde_json::Value>,
}

/// Scripted API client for testing services without a backend.
///
/// Responses and errors are matched by endpoint; every call is recorded so
/// tests can assert on traffic (including its absence for client-side
/// validation failures).
#[derive(Debug, Clone)]
pub struct MockApiClient {
    pub is_authenticated: bool,
    pub user: Option<User>,
    pub config: ClientConfig,
    responses: Arc<Mutex<Vec<(String, serde_json::Value, Option<Pagination>)>>>,
    errors: Arc<Mutex<Vec<(String, OratorError)>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            is_authenticated: false,
            user: None,
            config,
            responses: Arc::new(Mutex::new(Vec::new())),
            errors: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_auth(mut self, user: User) -> Self {
        self.is_authenticated = true;
        self.user = Some(user);
        self
    }

    pub fn add_response(&self, endpoint: String, response: serde_json::Value) {
        self.responses
            .lock()
            .unwrap()
            .push((endpoint, response, None));
    }

    pub fn add_page_response(
        &self,
        endpoint: String,
        response: serde_json::Value,
        pagination: Pagination,
    ) {
        self.responses
            .lock()
            .unwrap()
            .push((endpoint, response, Some(pagination)));
    }

    pub fn add_error(&self, endpoint: String, error: OratorError) {
        self.errors.lock().unwrap().push((endpoint, error));
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, method: Method, endpoint: &str, payload: Option<serde_json::Value>) {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            endpoint: endpoint.to_string(),
            payload,
        });
    }

    fn respond<R>(&self, endpoint: &str) -> Result<ApiResponse<R>>
    where
        R: DeserializeOwned,
    {
        let errors = self.errors.lock().unwrap();
        for (ep, error) in errors.iter() {
            if ep == endpoint {
                return Err(error.clone());
            }
        }
        drop(errors);

        let responses = self.responses.lock().unwrap();
        for (ep, response, pagination) in responses.iter() {
            if ep == endpoint {
                let data: R = serde_json::from_value(response.clone())
                    .map_err(|e| OratorError::serialization(e.to_string()))?;
                return Ok(ApiResponse {
                    success: true,
                    data: Some(data),
                    message: None,
                    error: None,
                    pagination: pagination.clone(),
                });
            }
        }

        // Default empty response
        Ok(ApiResponse {
            success: true,
            data: None,
            message: None,
            error: None,
            pagination: None,
        })
    }
}

impl ApiClient for MockApiClient {
    fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    fn current_user(&self) -> Option<User> {
        self.user.clone()
    }

    fn config(&self) -> ClientConfig {
        self.config.clone()
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
        let payload_value = payload.and_then(|data| serde_json::to_value(data).ok());
        self.record(method, endpoint, payload_value);
        self.respond(endpoint)
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
        self.record(
            Method::POST,
            endpoint,
            Some(serde_json::json!({
                "part": part_name,
                "fileName": file_path.display().to_string(),
                "contentType": content_type,
            })),
        );
        self.respond(endpoint)
    }
}
