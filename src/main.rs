// src/main.rs
use actix_web::{
    middleware::{DefaultHeaders, Logger},
    web, App, HttpServer,
};
use actix_web::http::header;
use actix_cors::Cors;
use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod auth;
mod auth_handlers;
mod cart;
mod cart_handlers;
mod catalog;
mod checkout;
mod config;
mod enums;
mod error;
mod handlers;
mod models;
mod monitoring;
mod payment_handlers;
mod stock;
mod stock_handlers;
mod storefront;
pub mod validator;

use actix_web::middleware::Compress;
use config::{load_config, Config};
use error::ApiError;
use monitoring::{Metrics, RequestLogger};
use storefront::{SharedStorefront, Storefront};

pub struct AppState {
    pub store: SharedStorefront,
    pub config: Config,
}

// ==================== ROUTES ====================

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            web::scope("/api")
                .route("/view", web::get().to(handlers::get_view))
                .route("/navigate", web::post().to(handlers::navigate))

                .service(
                    web::scope("/menu")
                        .route("", web::get().to(handlers::get_menu))
                        .route("/{id}", web::get().to(handlers::get_menu_item))
                )

                .service(
                    web::scope("/moods")
                        .route("", web::get().to(handlers::get_moods))
                        .route("/{key}/add", web::post().to(handlers::add_mood_recommendation))
                )

                .service(
                    web::scope("/cart")
                        .route("", web::get().to(cart_handlers::get_cart))
                        .route("/items", web::post().to(cart_handlers::add_to_cart))
                        .route("/items/{id}/quantity", web::post().to(cart_handlers::change_quantity))
                        .route("/items/{id}", web::delete().to(cart_handlers::remove_from_cart))
                )

                .service(
                    web::scope("/custom-order")
                        .route("", web::post().to(cart_handlers::add_custom_order))
                        .route("/open", web::post().to(cart_handlers::open_custom_order))
                        .route("/close", web::post().to(cart_handlers::close_custom_order))
                )

                .route("/checkout", web::post().to(payment_handlers::checkout))
                .service(
                    web::scope("/payment")
                        .route("", web::get().to(payment_handlers::get_payment))
                        .route("/method", web::post().to(payment_handlers::select_method))
                        .route("/pay", web::post().to(payment_handlers::pay))
                        .route("/cancel", web::post().to(payment_handlers::cancel))
                )

                .service(
                    web::scope("/auth")
                        .route("/login", web::post().to(auth_handlers::login))
                        .route("/register", web::post().to(auth_handlers::register))
                        .route("/logout", web::post().to(auth_handlers::logout))
                        .route("/session", web::get().to(auth_handlers::get_session))
                )

                .service(
                    web::scope("/reviews")
                        .route("", web::get().to(handlers::get_reviews))
                        .route("", web::post().to(handlers::create_review))
                )

                .service(
                    web::scope("/admin")
                        .route("/dashboard", web::get().to(stock_handlers::get_dashboard))
                        .route("/stock", web::get().to(stock_handlers::get_stock))
                        .route("/stock/history", web::get().to(stock_handlers::get_stock_history))
                        .route("/stock/{id}/adjust", web::post().to(stock_handlers::adjust_stock))
                )
        );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected request body: {}", err);
        ApiError::BadRequest(err.to_string()).into()
    })
}

// ==================== MAIN ====================

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (this calls load_env_file internally)
    let config = load_config()?;

    setup_logging(&config)?;
    config.print_startup_info();

    if config.is_production() {
        validate_production_config(&config)?;
    }

    let app_state = Arc::new(AppState {
        store: Storefront::new().shared(),
        config: config.clone(),
    });

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    log::info!("Starting server at http://{}", bind_address);

    let metrics_arc = Arc::new(Metrics::new());
    let metrics = web::Data::from(metrics_arc.clone());

    let server_config = config.clone();
    let mut server = HttpServer::new(move || {
        let cors = setup_improved_cors(&server_config.security.allowed_origins, server_config.is_production());
        let security_headers = setup_security_headers(&server_config.security);

        App::new()
            .wrap(cors)
            .wrap(security_headers)
            .wrap(Logger::default())
            .wrap(Compress::default())
            .wrap(RequestLogger::new(metrics_arc.clone()))
            .app_data(web::Data::new(app_state.clone()))
            .app_data(metrics.clone())
            .app_data(web::PayloadConfig::new(server_config.security.max_request_size))

            // Health check and metrics
            .service(
                web::scope("/health")
                    .route("", web::get().to(monitoring::health_check))
                    .route("/live", web::get().to(monitoring::liveness_check))
            )
            .route("/metrics", web::get().to(monitoring::metrics_endpoint))

            .configure(configure_routes)
    })
    .keep_alive(std::time::Duration::from_secs(config.server.keep_alive))
    .client_request_timeout(std::time::Duration::from_secs(config.server.client_timeout))
    .client_disconnect_timeout(std::time::Duration::from_secs(config.server.client_shutdown));

    if let Some(workers) = config.server.workers {
        server = server.workers(workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("Server failed to run")?;

    Ok(())
}

// ==================== HELPER FUNCTIONS ====================

pub fn setup_improved_cors(allowed_origins: &[String], is_production: bool) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![header::CONTENT_LENGTH])
        .max_age(3600);

    if allowed_origins.iter().any(|origin| origin == "*") && !is_production {
        log::warn!("⚠️  Using wildcard CORS (*) in development mode");
        return cors.allow_any_origin().allow_any_header().allow_any_method();
    }

    for origin in allowed_origins.iter().filter(|origin| !origin.is_empty() && *origin != "*") {
        log::debug!("Adding CORS origin: {}", origin);
        cors = cors.allowed_origin(origin);
    }

    cors
}

fn setup_logging(config: &Config) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.logging.level))
        .context("Invalid log level")?;

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    }
    .context("Failed to initialize logging")?;

    Ok(())
}

fn validate_production_config(config: &Config) -> anyhow::Result<()> {
    if config.security.allowed_origins.iter().any(|origin| origin == "*") {
        anyhow::bail!("Wildcard CORS origins not allowed in production!");
    }

    Ok(())
}

fn setup_security_headers(config: &config::SecurityConfig) -> DefaultHeaders {
    let mut headers = DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "DENY"))
        .add(("X-XSS-Protection", "1; mode=block"))
        .add(("Referrer-Policy", "strict-origin-when-cross-origin"));

    if config.require_https {
        headers = headers.add((
            "Strict-Transport-Security",
            "max-age=31536000; includeSubDomains; preload"
        ));
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_rejects_wildcard_origin() {
        let mut config = Config::default();
        assert!(validate_production_config(&config).is_ok());

        config.security.allowed_origins = vec!["*".to_string()];
        assert!(validate_production_config(&config).is_err());
    }
}
