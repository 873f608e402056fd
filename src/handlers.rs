// src/handlers.rs
use actix_web::{web, HttpResponse};
use std::sync::Arc;
use serde::{Serialize, Deserialize};
use validator::Validate;
use crate::AppState;
use crate::catalog;
use crate::enums::Page;
use crate::error::{ApiError, ApiResult};
use crate::models::{CreateReviewRequest, MenuItemResponse};
use crate::storefront::lock_store;
use crate::validator::CustomValidate;

// ==================== COMMON STRUCTURES ====================

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub page: Page,
}

// ==================== VIEW & NAVIGATION ====================

pub async fn get_view(app_state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let store = lock_store(&app_state.store)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(store.view())))
}

pub async fn navigate(
    app_state: web::Data<Arc<AppState>>,
    request: web::Json<NavigateRequest>,
) -> ApiResult<HttpResponse> {
    let mut store = lock_store(&app_state.store)?;
    let page = store.navigate(request.page)?;
    log::debug!("Navigated to {} (requested {})", page, request.page);
    Ok(HttpResponse::Ok().json(ApiResponse::success(store.view())))
}

// ==================== MENU ====================

pub async fn get_menu() -> ApiResult<HttpResponse> {
    let items: Vec<MenuItemResponse> = catalog::menu_items()
        .iter()
        .cloned()
        .map(MenuItemResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(items)))
}

pub async fn get_menu_item(path: web::Path<String>) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let item = catalog::find_orderable_item(&id)
        .ok_or_else(|| ApiError::menu_item_not_found(&id))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(MenuItemResponse::from(item))))
}

// ==================== MOODS ====================

pub async fn get_moods() -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(catalog::mood_recommendations())))
}

pub async fn add_mood_recommendation(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let key = path.into_inner();
    let mut store = lock_store(&app_state.store)?;
    let recommendation = store.add_mood_recommendation(&key)?;
    let message = format!("{} added to cart", recommendation.recommendation.name);

    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(store.cart_view(), message)))
}

// ==================== REVIEWS ====================

pub async fn get_reviews(app_state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let store = lock_store(&app_state.store)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(store.reviews().to_vec())))
}

pub async fn create_review(
    app_state: web::Data<Arc<AppState>>,
    request: web::Json<CreateReviewRequest>,
) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;
    request.custom_validate().into_result()?;

    let mut store = lock_store(&app_state.store)?;
    let review = store.submit_review(request)?;
    log::info!("New {}-star review from {}", review.rating, review.user_name);

    Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
        review,
        "Thank you for your review!".to_string(),
    )))
}
