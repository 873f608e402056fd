// src/payment_handlers.rs - Checkout and payment simulator handlers
use actix_web::{web, HttpResponse};
use std::sync::Arc;
use serde::Deserialize;
use crate::AppState;
use crate::checkout::{spawn_payment_timers, PaymentDelays};
use crate::enums::PaymentMethod;
use crate::error::ApiResult;
use crate::handlers::ApiResponse;
use crate::storefront::lock_store;

#[derive(Debug, Deserialize)]
pub struct SelectMethodRequest {
    pub method: PaymentMethod,
}

pub async fn checkout(app_state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let mut store = lock_store(&app_state.store)?;
    let payment = store.checkout()?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(payment)))
}

pub async fn get_payment(app_state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let store = lock_store(&app_state.store)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(store.payment_view())))
}

pub async fn select_method(
    app_state: web::Data<Arc<AppState>>,
    request: web::Json<SelectMethodRequest>,
) -> ApiResult<HttpResponse> {
    let mut store = lock_store(&app_state.store)?;
    let payment = store.select_payment_method(request.method)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(payment)))
}

/// Moves the flow to processing and hands the rest to the timers
pub async fn pay(app_state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let payment = {
        let mut store = lock_store(&app_state.store)?;
        store.begin_payment()?
    };

    let delays = PaymentDelays::from(&app_state.config.checkout);
    log::info!(
        "Processing {} payment of Rp {:.0}",
        payment.method,
        payment.total
    );
    spawn_payment_timers(app_state.store.clone(), delays);

    Ok(HttpResponse::Accepted().json(ApiResponse::success_with_message(
        payment,
        "Processing payment...".to_string(),
    )))
}

pub async fn cancel(app_state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let mut store = lock_store(&app_state.store)?;
    let payment = store.cancel_payment()?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(payment)))
}
