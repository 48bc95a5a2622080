use std::env;

/// Process-wide configuration, read once at startup and passed into
/// `AppState` explicitly. Nothing else in the crate touches the environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: String,
    pub openai_api_key: String,
    pub openai_api_base: String,
    pub openai_model: String,
    /// Single origin allowed by the CORS layer (the frontend dev server).
    pub allowed_origin: String,
    pub db: Option<DbConfig>,
}

/// Postgres connection settings for the document store. The pool is created
/// at startup but nothing queries it yet.
#[derive(Clone, Debug)]
pub struct DbConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub dbname: String,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_or("BIND_ADDR", "0.0.0.0:8080"),
            openai_api_key: env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set"),
            openai_api_base: env_or("OPENAI_API_BASE", "https://api.openai.com/v1"),
            openai_model: env_or("OPENAI_MODEL", "gpt-3.5-turbo"),
            allowed_origin: env_or("ALLOWED_ORIGIN", "http://localhost:3000"),
            db: DbConfig::from_env(),
        }
    }
}

impl DbConfig {
    /// All four DB_* variables must be present; a partial set is treated as
    /// unconfigured.
    fn from_env() -> Option<Self> {
        Some(Self {
            host: env::var("DB_HOST").ok()?,
            user: env::var("DB_USER").ok()?,
            password: env::var("DB_PASSWORD").ok()?,
            dbname: env::var("DB_NAME").ok()?,
        })
    }
}
