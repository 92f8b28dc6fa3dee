//! Server configuration from environment variables.

use comenius_error::{ServerError, ServerErrorKind};

/// Runtime configuration for the lesson server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Postgres connection URL
    pub database_url: String,
    /// Root directory of the filesystem lesson store
    pub storage_root: String,
    /// OpenAI model identifier
    pub model: String,
    /// Socket address the server binds to
    pub bind_addr: String,
}

impl AppConfig {
    /// Create config from environment variables.
    ///
    /// Reads:
    /// - `DATABASE_URL` (required)
    /// - `LESSON_STORAGE_ROOT` (required)
    /// - `COMENIUS_MODEL` (default: "gpt-4o")
    /// - `COMENIUS_BIND_ADDR` (default: "0.0.0.0:3000")
    ///
    /// The OpenAI credential itself is read by the model client, not here.
    pub fn from_env() -> Result<Self, ServerError> {
        let database_url = required("DATABASE_URL")?;
        let storage_root = required("LESSON_STORAGE_ROOT")?;
        let model = std::env::var("COMENIUS_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());
        let bind_addr =
            std::env::var("COMENIUS_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        Ok(Self {
            database_url,
            storage_root,
            model,
            bind_addr,
        })
    }
}

fn required(name: &'static str) -> Result<String, ServerError> {
    std::env::var(name).map_err(|_| {
        ServerError::new(ServerErrorKind::Configuration(format!("{name} not set")))
    })
}
