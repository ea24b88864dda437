use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: RunMode,
    pub server: ServerConfig,
    pub identity: IdentityConfig,
    pub cors: CorsConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    Debug,
    Release,
    Test,
}

impl std::str::FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" | "dev" | "development" => Ok(RunMode::Debug),
            "release" | "prod" | "production" => Ok(RunMode::Release),
            "test" => Ok(RunMode::Test),
            other => Err(format!("unknown run mode '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityConfig {
    pub credentials_file: PathBuf,
    /// HS256 secret. Takes precedence over the credentials file.
    pub jwt_secret: Option<String>,
    /// When set, tokens must carry it as audience and in the issuer.
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub allow_headers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("GIN_MODE").or_else(|| lookup("APP_MODE")) {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid { var: "GIN_MODE", value: v })?,
            None => RunMode::Debug,
        };

        // Defaults per run mode, then specific variables on top
        match environment {
            RunMode::Release => Self::release(),
            RunMode::Test => Self::test(),
            RunMode::Debug => Self::debug(),
        }
        .with_overrides(&lookup)
    }

    fn with_overrides<F>(mut self, lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PORT") {
            self.server.port = parse_var("PORT", v)?;
        }

        if let Some(v) = lookup("FIREBASE_CREDENTIALS").filter(|v| !v.trim().is_empty()) {
            self.identity.credentials_file = PathBuf::from(v);
        }
        if let Some(v) = lookup("IDENTITY_JWT_SECRET").filter(|v| !v.is_empty()) {
            self.identity.jwt_secret = Some(v);
        }
        if let Some(v) = lookup("IDENTITY_PROJECT_ID").filter(|v| !v.trim().is_empty()) {
            self.identity.project_id = Some(v.trim().to_string());
        }

        if let Some(v) = lookup("CORS_ALLOW_ORIGINS") {
            self.cors.allow_origins = split_list(&v);
        }
        if let Some(v) = lookup("CORS_ALLOW_HEADERS") {
            self.cors.allow_headers = split_list(&v);
        }

        if let Some(v) = lookup("PAGE_SIZE_DEFAULT") {
            self.pagination.default_page_size = parse_var("PAGE_SIZE_DEFAULT", v)?;
        }
        if let Some(v) = lookup("PAGE_SIZE_MAX") {
            self.pagination.max_page_size = parse_var("PAGE_SIZE_MAX", v)?;
        }
        if self.pagination.default_page_size == 0 || self.pagination.max_page_size == 0 {
            return Err(ConfigError::Invalid {
                var: "PAGE_SIZE_DEFAULT",
                value: "0".into(),
            });
        }
        self.pagination.default_page_size = self.pagination.default_page_size.min(self.pagination.max_page_size);

        Ok(self)
    }

    fn debug() -> Self {
        Self {
            environment: RunMode::Debug,
            server: ServerConfig { port: 8080 },
            identity: IdentityConfig {
                credentials_file: PathBuf::from("config/serviceAccountKey.json"),
                jwt_secret: None,
                project_id: None,
            },
            cors: CorsConfig {
                allow_origins: vec![
                    "http://localhost:3000".to_string(),
                    "https://guiver-84885.web.app".to_string(),
                ],
                allow_headers: ["Origin", "Content-Type", "Accept", "Authorization"]
                    .iter()
                    .map(|h| h.to_string())
                    .collect(),
            },
            pagination: PaginationConfig {
                default_page_size: 10,
                max_page_size: 100,
            },
        }
    }

    fn release() -> Self {
        Self {
            environment: RunMode::Release,
            ..Self::debug()
        }
    }

    fn test() -> Self {
        Self {
            environment: RunMode::Test,
            ..Self::debug()
        }
    }

    /// Log filter used when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        match self.environment {
            RunMode::Debug => "debug,tower_http=debug",
            RunMode::Release => "info",
            RunMode::Test => "warn",
        }
    }

    pub fn is_release(&self) -> bool {
        self.environment == RunMode::Release
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::debug()
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid { var, value })
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
