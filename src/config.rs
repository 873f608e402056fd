// src/config.rs - Configuration management
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use anyhow::{Context, Result};
use crate::validator::FieldValidator;

/// Upper bound for either payment timer
pub const MAX_PAYMENT_DELAY_MS: u64 = 60_000;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub checkout: CheckoutConfig,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    pub keep_alive: u64,
    pub client_timeout: u64,
    pub client_shutdown: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CheckoutConfig {
    pub processing_delay_ms: u64,
    pub confirmation_delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SecurityConfig {
    pub allowed_origins: Vec<String>,
    pub max_request_size: usize,
    pub require_https: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: None,
            keep_alive: 30,
            client_timeout: 30,
            client_shutdown: 5,
        }
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: 2000,
            confirmation_delay_ms: 2000,
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            max_request_size: 64 * 1024,
            require_https: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

pub fn load_config() -> Result<Config> {
    load_env_file()?;

    let mut config = if let Ok(config_file) = env::var("CONFIG_FILE") {
        let config_str = fs::read_to_string(Path::new(&config_file))
            .with_context(|| format!("Failed to read config file: {}", config_file))?;
        toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", config_file))?
    } else {
        Config::default()
    };

    override_with_env(&mut config);

    config.validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring {}={:?}: not a valid value", key, raw);
            None
        }
    }
}

fn override_with_env(config: &mut Config) {
    if let Ok(host) = env::var("BIND_ADDRESS") {
        config.server.host = host;
    }
    if let Some(port) = env_parsed::<u16>("KOPI_PORT") {
        config.server.port = port;
    }
    if let Some(workers) = env_parsed::<usize>("KOPI_WORKERS") {
        config.server.workers = Some(workers);
    }
    if let Some(delay) = env_parsed::<u64>("PAYMENT_PROCESSING_DELAY_MS") {
        config.checkout.processing_delay_ms = delay;
    }
    if let Some(delay) = env_parsed::<u64>("PAYMENT_CONFIRMATION_DELAY_MS") {
        config.checkout.confirmation_delay_ms = delay;
    }
    if let Ok(origins_str) = env::var("ALLOWED_ORIGINS") {
        config.security.allowed_origins = origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    if let Ok(level) = env::var("RUST_LOG") {
        config.logging.level = level;
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        load_config()
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("server.port must be non-zero"));
        }

        if self.server.workers == Some(0) {
            return Err(anyhow::anyhow!("server.workers must be at least 1 when set"));
        }

        for (name, value) in [
            ("processing_delay_ms", self.checkout.processing_delay_ms),
            ("confirmation_delay_ms", self.checkout.confirmation_delay_ms),
        ] {
            if value > MAX_PAYMENT_DELAY_MS {
                return Err(anyhow::anyhow!(
                    "checkout.{} must be <= {} ms (current: {})",
                    name,
                    MAX_PAYMENT_DELAY_MS,
                    value
                ));
            }
        }

        for origin in self.security.allowed_origins.iter().filter(|o| o.as_str() != "*") {
            FieldValidator::origin(origin, "security.allowed_origins")
                .map_err(|e| anyhow::anyhow!(e))?;
        }

        if self.logging.level.trim().is_empty() {
            return Err(anyhow::anyhow!("logging.level must not be empty"));
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        env::var("KOPI_ENV").map(|v| v == "production").unwrap_or(false)
    }

    pub fn print_startup_info(&self) {
        log::info!("☕ Kopi Santai starting up...");
        log::info!("🌐 Server: {}:{}", self.server.host, self.server.port);
        log::info!(
            "💳 Payment simulator: {} ms processing, {} ms confirmation",
            self.checkout.processing_delay_ms,
            self.checkout.confirmation_delay_ms
        );
        log::info!("📊 Logging: {} level", self.logging.level);

        if !self.is_production() {
            log::warn!("🚧 Running in development mode");
        }

        if self.security.require_https {
            log::info!("🔒 HTTPS enforcement enabled");
        } else if self.is_production() {
            log::warn!("⚠️  HTTPS not required in production mode");
        }
    }
}

pub fn load_env_file() -> Result<()> {
    if let Ok(env_file) = env::var("ENV_FILE") {
        dotenvy::from_filename(&env_file)
            .with_context(|| format!("Failed to load environment file: {}", env_file))?;
    } else if Path::new(".env").exists() {
        dotenvy::dotenv().context("Failed to load .env file")?;
    }
    Ok(())
}
