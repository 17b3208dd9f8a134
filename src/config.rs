use std::env;

use crate::gateway::stripe::STRIPE_API_BASE;

/// Process configuration, read once at startup from the environment
/// (after `dotenv` has loaded any `.env` file).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_name: String,
    pub access_token_secret: Option<String>,
    pub payment_secret_key: Option<String>,
    pub payment_api_base: String,
    pub payment_currency: String,
    pub allowed_origins: Vec<String>,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = var_or("PORT", "5000").parse().unwrap_or_else(|_| {
            log::warn!("⚠️  Invalid PORT, falling back to 5000");
            5000
        });

        Self {
            host: var_or("HOST", "0.0.0.0"),
            port,
            database_url: var_or("DATABASE_URL", "mongodb://localhost:27017"),
            database_name: var_or("DATABASE_NAME", "campCraftopiaDB"),
            access_token_secret: optional_var("ACCESS_TOKEN_SECRET"),
            payment_secret_key: optional_var("PAYMENT_SECRET_KEY"),
            payment_api_base: var_or("PAYMENT_API_BASE", STRIPE_API_BASE),
            payment_currency: var_or("PAYMENT_CURRENCY", "usd").to_lowercase(),
            allowed_origins: parse_origins(&var_or("CORS_ALLOWED_ORIGINS", "")),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
