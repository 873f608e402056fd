// src/auth.rs
//! Mock authentication: a fixed two-entry credential table and fabricated
//! registrations. Sessions live only in the storefront state.

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::error::{ApiError, ApiResult};

// ======== USER ROLE ========

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Customer,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Admin => "admin",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            UserRole::Customer => "Customer",
            UserRole::Admin => "Administrator",
        }
    }

    // ======== PERMISSIONS ========
    pub fn can_view_dashboard(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn can_manage_stock(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn can_checkout(&self) -> bool {
        true // Any logged-in user can pay
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ======== SESSION ========

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

// ======== REQUEST STRUCTS ========

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "All fields are required"))]
    pub name: String,
    #[validate(length(min = 1, message = "All fields are required"))]
    pub email: String,
    #[validate(length(min = 1, message = "All fields are required"))]
    pub password: String,
}

// ======== MOCK ACCOUNTS ========

struct MockAccount {
    email: &'static str,
    password: &'static str,
    name: &'static str,
    role: UserRole,
}

static MOCK_ACCOUNTS: &[MockAccount] = &[
    MockAccount {
        email: "admin@kopisantai.com",
        password: "admin123",
        name: "Admin",
        role: UserRole::Admin,
    },
    MockAccount {
        email: "customer@example.com",
        password: "customer123",
        name: "Budi",
        role: UserRole::Customer,
    },
];

/// Exact-match lookup against the mock table
pub fn authenticate(email: &str, password: &str) -> ApiResult<Session> {
    MOCK_ACCOUNTS
        .iter()
        .find(|account| account.email == email && account.password == password)
        .map(|account| Session {
            email: account.email.to_string(),
            name: account.name.to_string(),
            role: account.role,
        })
        .ok_or_else(ApiError::invalid_credentials)
}

/// Any complete form becomes a customer session; nothing is stored
pub fn register(request: RegisterRequest) -> ApiResult<Session> {
    request
        .validate()
        .map_err(|_| ApiError::ValidationError("All fields are required".to_string()))?;

    Ok(Session {
        email: request.email,
        name: request.name,
        role: UserRole::Customer,
    })
}

// ======== HELPER FUNCTIONS ========

pub fn check_permission<F>(session: Option<&Session>, check: F) -> ApiResult<&Session>
where
    F: Fn(&UserRole) -> bool,
{
    match session {
        Some(session) if check(&session.role) => Ok(session),
        _ => Err(ApiError::admin_only()),
    }
}
