use crate::core::search::RoleFilterMode;
use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

/// JWT and permission settings.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Token lifetime in seconds from issuance; fixed, not sliding.
    pub jwt_exp_secs: i64,
    /// How a `role` query parameter interacts with free-text user search.
    pub role_filter_mode: RoleFilterMode,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            auth: AuthConfig {
                jwt_secret: env::var("JWT_SECRET")
                    .map_err(|_| AppError::Configuration("JWT_SECRET not set".to_string()))?,
                jwt_exp_secs: env::var("JWT_EXP_SECS")
                    .unwrap_or_else(|_| "86400".to_string())
                    .parse()
                    .map_err(|_| AppError::Configuration("Invalid JWT_EXP_SECS".to_string()))?,
                role_filter_mode: RoleFilterMode::from_param(
                    &env::var("USER_ROLE_FILTER_MODE").unwrap_or_else(|_| "combine".to_string()),
                ),
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(AppError::Configuration(
                "JWT secret must not be empty".to_string(),
            ));
        }

        if self.auth.jwt_exp_secs <= 0 {
            return Err(AppError::Configuration(
                "JWT expiry must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
