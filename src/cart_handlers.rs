// src/cart_handlers.rs - Cart and custom-order route handlers
use actix_web::{web, HttpResponse};
use std::sync::Arc;
use validator::Validate;
use crate::AppState;
use crate::cart::{AddToCartRequest, ChangeQuantityRequest, CustomOrderRequest, OpenCustomOrderRequest, QuantityChange};
use crate::error::ApiResult;
use crate::handlers::ApiResponse;
use crate::storefront::lock_store;
use crate::validator::CustomValidate;

// ==================== CART ====================

pub async fn get_cart(app_state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let store = lock_store(&app_state.store)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(store.cart_view())))
}

pub async fn add_to_cart(
    app_state: web::Data<Arc<AppState>>,
    request: web::Json<AddToCartRequest>,
) -> ApiResult<HttpResponse> {
    request.validate()?;

    let mut store = lock_store(&app_state.store)?;
    let line_id = store.add_to_cart(&request.menu_item_id, request.quantity)?;
    let name = store
        .cart()
        .get(&line_id)
        .map(|line| line.name.clone())
        .unwrap_or_default();

    log::debug!("Added {} x{} to cart", line_id, request.quantity);

    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        store.cart_view(),
        format!("{} added to cart", name),
    )))
}

pub async fn change_quantity(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    request: web::Json<ChangeQuantityRequest>,
) -> ApiResult<HttpResponse> {
    let line_id = path.into_inner();
    let mut store = lock_store(&app_state.store)?;

    let message = match store.change_quantity(&line_id, request.delta)? {
        QuantityChange::Removed => Some("Item removed from cart".to_string()),
        _ => None,
    };

    let response = match message {
        Some(message) => ApiResponse::success_with_message(store.cart_view(), message),
        None => ApiResponse::success(store.cart_view()),
    };
    Ok(HttpResponse::Ok().json(response))
}

/// Removing an id that is not in the cart is not an error
pub async fn remove_from_cart(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let line_id = path.into_inner();
    let mut store = lock_store(&app_state.store)?;

    if !store.remove_from_cart(&line_id)? {
        log::debug!("Remove for {} matched nothing", line_id);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        store.cart_view(),
        "Item removed from cart".to_string(),
    )))
}

// ==================== CUSTOM ORDER ====================

pub async fn open_custom_order(
    app_state: web::Data<Arc<AppState>>,
    request: Option<web::Json<OpenCustomOrderRequest>>,
) -> ApiResult<HttpResponse> {
    let request = request.map(web::Json::into_inner).unwrap_or_default();
    let mut store = lock_store(&app_state.store)?;
    let item = store.open_custom_order(request.menu_item_id.as_deref())?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(item)))
}

pub async fn close_custom_order(app_state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let mut store = lock_store(&app_state.store)?;
    store.close_custom_order()?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(store.view())))
}

pub async fn add_custom_order(
    app_state: web::Data<Arc<AppState>>,
    request: web::Json<CustomOrderRequest>,
) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;
    request.custom_validate().into_result()?;

    let mut store = lock_store(&app_state.store)?;
    let line_id = store.add_custom_order(request)?;
    let name = store
        .cart()
        .get(&line_id)
        .map(|line| line.name.clone())
        .unwrap_or_default();

    log::info!("Custom order {} added to cart", line_id);

    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        store.cart_view(),
        format!("{} (custom) added to cart", name),
    )))
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::handlers::test_support::*;
    use actix_web::test;
    use serde_json::{json, Value};

    #[actix_rt::test]
    async fn test_add_merges_plain_items() {
        let app = init_test_app!(app_state(Config::default()));

        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/api/cart/items")
                .set_json(json!({ "menu_item_id": "2" }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert!(resp.status().is_success());
        }

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/cart").to_request(),
        )
        .await;
        assert_eq!(body["data"]["item_count"], 1);
        assert_eq!(body["data"]["items"][0]["quantity"], 2);
        assert_eq!(body["data"]["totals"]["subtotal"], 26000);
        assert_eq!(body["data"]["totals"]["tax"], 2600.0);
        assert_eq!(body["data"]["totals"]["grand_total"], 28600.0);
    }

    #[actix_rt::test]
    async fn test_add_rejects_bad_input() {
        let app = init_test_app!(app_state(Config::default()));

        let req = test::TestRequest::post()
            .uri("/api/cart/items")
            .set_json(json!({ "menu_item_id": "2", "quantity": 0 }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 422);

        let req = test::TestRequest::post()
            .uri("/api/cart/items")
            .set_json(json!({ "menu_item_id": "77" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);
    }

    #[actix_rt::test]
    async fn test_quantity_change_and_remove() {
        let app = init_test_app!(app_state(Config::default()));
        let req = test::TestRequest::post()
            .uri("/api/cart/items")
            .set_json(json!({ "menu_item_id": "1", "quantity": 2 }))
            .to_request();
        test::call_service(&app, req).await;

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/api/cart/items/1/quantity")
                .set_json(json!({ "delta": -1 }))
                .to_request(),
        )
        .await;
        assert_eq!(body["data"]["items"][0]["quantity"], 1);

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/api/cart/items/1/quantity")
                .set_json(json!({ "delta": -1 }))
                .to_request(),
        )
        .await;
        assert_eq!(body["data"]["item_count"], 0);
        assert_eq!(body["message"], "Item removed from cart");

        let req = test::TestRequest::post()
            .uri("/api/cart/items/1/quantity")
            .set_json(json!({ "delta": 1 }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);

        let req = test::TestRequest::delete().uri("/api/cart/items/1").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 200);
    }

    #[actix_rt::test]
    async fn test_extreme_delta_leaves_store_usable() {
        let app = init_test_app!(app_state(Config::default()));
        let req = test::TestRequest::post()
            .uri("/api/cart/items")
            .set_json(json!({ "menu_item_id": "1", "quantity": 150 }))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::post()
            .uri("/api/cart/items/1/quantity")
            .set_json(json!({ "delta": i64::MAX }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 422);

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/cart").to_request(),
        )
        .await;
        assert_eq!(body["data"]["items"][0]["quantity"], 150);

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/api/cart/items/1/quantity")
                .set_json(json!({ "delta": i64::MIN }))
                .to_request(),
        )
        .await;
        assert_eq!(body["data"]["item_count"], 0);
    }

    #[actix_rt::test]
    async fn test_custom_orders_never_merge() {
        let app = init_test_app!(app_state(Config::default()));

        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/api/custom-order/open")
                .set_json(json!({ "menu_item_id": "3" }))
                .to_request();
            assert!(test::call_service(&app, req).await.status().is_success());

            let req = test::TestRequest::post()
                .uri("/api/custom-order")
                .set_json(json!({ "coffee_level": "strong", "sugar_level": 30, "temperature": "hot" }))
                .to_request();
            assert!(test::call_service(&app, req).await.status().is_success());
        }

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/cart").to_request(),
        )
        .await;
        let items = body["data"]["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_ne!(items[0]["id"], items[1]["id"]);
        assert_eq!(items[0]["customization"]["coffee_level"], "strong");
        assert_eq!(items[0]["customization"]["notes"], "");
    }

    #[actix_rt::test]
    async fn test_custom_order_validation() {
        let app = init_test_app!(app_state(Config::default()));
        let req = test::TestRequest::post().uri("/api/custom-order/open").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["id"], "custom");

        let req = test::TestRequest::post()
            .uri("/api/custom-order")
            .set_json(json!({ "sugar_level": 33 }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 422);

        let req = test::TestRequest::post().uri("/api/custom-order/close").to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::post()
            .uri("/api/custom-order")
            .set_json(json!({}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);
    }
}
