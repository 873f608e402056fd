// src/stock_handlers.rs - Admin dashboard and stock management
use actix_web::{web, HttpResponse};
use std::sync::Arc;
use crate::AppState;
use crate::error::ApiResult;
use crate::handlers::ApiResponse;
use crate::models::AdjustStockRequest;
use crate::storefront::lock_store;
use crate::validator::CustomValidate;

pub async fn get_dashboard(app_state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let mut store = lock_store(&app_state.store)?;
    let dashboard = store.dashboard()?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(dashboard)))
}

pub async fn get_stock(app_state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let mut store = lock_store(&app_state.store)?;
    let overview = store.stock_overview()?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(overview)))
}

pub async fn get_stock_history(app_state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let mut store = lock_store(&app_state.store)?;
    let history = store.stock_history()?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(history)))
}

pub async fn adjust_stock(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    request: web::Json<AdjustStockRequest>,
) -> ApiResult<HttpResponse> {
    let item_id = path.into_inner();
    request.custom_validate().into_result()?;

    let mut store = lock_store(&app_state.store)?;
    let item = store.adjust_stock(&item_id, &request)?;

    log::info!(
        "Stock {} ({}) is now {} {} [{}]",
        item.item.name,
        request.direction,
        item.item.quantity,
        item.item.unit,
        item.status
    );

    let message = format!("{} stock updated", item.item.name);
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(item, message)))
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::handlers::test_support::*;
    use actix_web::test;
    use serde_json::{json, Value};

    #[actix_rt::test]
    async fn test_admin_only() {
        let app = init_test_app!(app_state(Config::default()));

        for uri in ["/api/admin/dashboard", "/api/admin/stock", "/api/admin/stock/history"] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), 403, "{}", uri);
        }

        login_as!(app, "customer@example.com", "customer123");
        let req = test::TestRequest::post()
            .uri("/api/admin/stock/1/adjust")
            .set_json(json!({ "direction": "add", "amount": 5 }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 403);
    }

    #[actix_rt::test]
    async fn test_dashboard() {
        let app = init_test_app!(app_state(Config::default()));
        login_as!(app, "admin@kopisantai.com", "admin123");

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/admin/dashboard").to_request(),
        )
        .await;
        let data = &body["data"];
        assert_eq!(data["stats"]["total_orders"], 87);
        assert_eq!(data["stock"].as_array().unwrap().len(), 5);
        assert_eq!(data["stock_warnings"], json!(["Susu", "Gula Aren"]));
    }

    #[actix_rt::test]
    async fn test_adjust_with_string_amount() {
        let app = init_test_app!(app_state(Config::default()));
        login_as!(app, "admin@kopisantai.com", "admin123");

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/api/admin/stock/2/adjust")
                .set_json(json!({ "direction": "add", "amount": "10" }))
                .to_request(),
        )
        .await;
        assert_eq!(body["data"]["quantity"], 22.0);
        assert_eq!(body["data"]["status"], "normal");
        assert_eq!(body["data"]["last_updated"], "Baru saja");

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/admin/stock/history").to_request(),
        )
        .await;
        assert_eq!(body["data"][0]["item"], "Susu");
        assert_eq!(body["data"][0]["action"], "add");
        assert_eq!(body["data"][0]["user"], "Admin");
    }

    #[actix_rt::test]
    async fn test_subtract_clamps_and_invalid_amount() {
        let app = init_test_app!(app_state(Config::default()));
        login_as!(app, "admin@kopisantai.com", "admin123");

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/api/admin/stock/5/adjust")
                .set_json(json!({ "direction": "subtract", "amount": 500 }))
                .to_request(),
        )
        .await;
        assert_eq!(body["data"]["quantity"], 0.0);
        assert_eq!(body["data"]["status"], "critical");

        for amount in [json!("abc"), json!(-2), json!(0)] {
            let req = test::TestRequest::post()
                .uri("/api/admin/stock/1/adjust")
                .set_json(json!({ "direction": "add", "amount": amount }))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), 422);
        }

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/admin/stock").to_request(),
        )
        .await;
        assert_eq!(body["data"]["items"][0]["quantity"], 45.0);

        let req = test::TestRequest::post()
            .uri("/api/admin/stock/99/adjust")
            .set_json(json!({ "direction": "add", "amount": 1 }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);
    }
}
