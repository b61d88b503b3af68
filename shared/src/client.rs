//! Client-related types
//!
//! Request/response bodies of the account endpoints (token, register,
//! profile, password).

use serde::{Deserialize, Serialize};

use crate::models::User;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Token request (`POST token/`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}

/// Token response: access/refresh pair plus the authenticated user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access: String,
    pub refresh: Option<String>,
    pub user: User,
}

/// Registration request (`POST register/`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Full name
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
}

/// Registered account as echoed by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub username: String,
    pub email: String,
}

// =============================================================================
// Account self-service DTOs
// =============================================================================

/// Profile update (`PATCH profile/`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
}

/// Password change (`PUT change-password/`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Minimum password length accepted by the backend
pub const MIN_PASSWORD_LEN: usize = 8;
