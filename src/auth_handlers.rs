// src/auth_handlers.rs - Mock login/registration route handlers

use actix_web::{web, HttpResponse};
use std::sync::Arc;
use serde::Serialize;

use crate::handlers::ApiResponse;
use crate::auth::{LoginRequest, RegisterRequest, Session};
use crate::error::ApiResult;
use crate::storefront::lock_store;
use crate::AppState;

// ======== RESPONSE STRUCTS ========

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub logged_in: bool,
    pub user: Option<Session>,
    pub role_name: Option<&'static str>,
}

impl From<Option<&Session>> for SessionInfo {
    fn from(session: Option<&Session>) -> Self {
        Self {
            logged_in: session.is_some(),
            user: session.cloned(),
            role_name: session.map(|s| s.role.display_name()),
        }
    }
}

// ======== HANDLERS ========

pub async fn login(
    app_state: web::Data<Arc<AppState>>,
    request: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let mut store = lock_store(&app_state.store)?;

    let session = match store.login(&request) {
        Ok(session) => session,
        Err(e) => {
            log::warn!("Failed login attempt for {}", request.email);
            return Err(e);
        }
    };

    log::info!("User {} logged in as {}", session.email, session.role);

    let message = format!("Welcome, {}!", session.name);
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(session, message)))
}

pub async fn register(
    app_state: web::Data<Arc<AppState>>,
    request: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let mut store = lock_store(&app_state.store)?;
    let session = store.register(request.into_inner())?;

    log::info!("Registered new customer session for {}", session.email);

    let message = format!("Welcome, {}!", session.name);
    Ok(HttpResponse::Created().json(ApiResponse::success_with_message(session, message)))
}

pub async fn logout(app_state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let mut store = lock_store(&app_state.store)?;

    if let Some(previous) = store.logout()? {
        log::info!("User {} logged out", previous.email);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        SessionInfo::from(None),
        "Logged out".to_string(),
    )))
}

pub async fn get_session(app_state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let store = lock_store(&app_state.store)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(SessionInfo::from(store.user()))))
}
