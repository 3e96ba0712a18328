//! Environment-driven configuration

use anyhow::{Context, Result};

/// Server configuration read once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub razorpay_key_id: String,
    pub razorpay_key_secret: String,
    pub media_root: String,
    pub cors_allowed_origins: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse()
            .context("PORT must be a number")?;
        let jwt_secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        let razorpay_key_id =
            std::env::var("RAZORPAY_KEY_ID").context("RAZORPAY_KEY_ID must be set")?;
        let razorpay_key_secret =
            std::env::var("RAZORPAY_KEY_SECRET").context("RAZORPAY_KEY_SECRET must be set")?;
        let media_root = std::env::var("MEDIA_ROOT").unwrap_or_else(|_| "media".to_string());
        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        Ok(Self {
            database_url,
            port,
            jwt_secret,
            razorpay_key_id,
            razorpay_key_secret,
            media_root,
            cors_allowed_origins,
        })
    }
}
