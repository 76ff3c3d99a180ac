//! Authentication API DTOs
//!
//! Request/response bodies for POST /auth/login, /auth/register and
//! /auth/logout.

use serde::{Deserialize, Serialize};
use validator::Validate;

pub use crate::common::LoginResponse;

/// Credential login request for POST /auth/login
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 255))]
    pub password: String,
}

/// Account registration request for POST /auth/register
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 255))]
    pub password: String,
}

/// Registration response
///
/// Registering logs the new account in, so the shape matches login.
pub type RegisterResponse = LoginResponse;
