use project_common::config::{get_env, optional_env, parse_env, Environment};
use project_common::error::AppError;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct UserConfig {
    pub environment: Environment,
    pub service_name: String,
    pub service_version: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub grpc_port: u16,
    pub grpc_request_timeout_ms: u64,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub jwt: JwtConfig,
    pub captcha: CaptchaConfig,
    pub organization: OrganizationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    Redis,
    Memory,
}

impl std::str::FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(CacheBackend::Redis),
            "memory" => Ok(CacheBackend::Memory),
            _ => Err(format!("Invalid cache backend: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    pub redis_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_exp_days: i64,
    pub refresh_exp_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaptchaConfig {
    pub ttl_seconds: u64,
    /// Deadline for the detached cache write after a code is issued.
    pub cache_timeout_ms: u64,
    /// Fixed code handed out instead of a random one (local development and tests).
    pub fixed_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationConfig {
    pub default_avatar: String,
}

impl UserConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env()?;
        let is_prod = environment.is_prod();

        let config = UserConfig {
            environment,
            service_name: get_env("SERVICE_NAME", Some("project-user"), is_prod)?,
            service_version: get_env("SERVICE_VERSION", Some(env!("CARGO_PKG_VERSION")), false)?,
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
            otlp_endpoint: optional_env("OTLP_ENDPOINT"),
            grpc_port: parse_env("GRPC_PORT", Some("50051"), is_prod)?,
            grpc_request_timeout_ms: parse_env("GRPC_REQUEST_TIMEOUT_MS", Some("5000"), false)?,
            database: DatabaseConfig {
                url: get_env("DATABASE_URL", None, is_prod)?,
                max_connections: parse_env("DATABASE_MAX_CONNECTIONS", Some("10"), false)?,
                min_connections: parse_env("DATABASE_MIN_CONNECTIONS", Some("1"), false)?,
            },
            cache: CacheConfig {
                backend: parse_env("CACHE_BACKEND", Some("redis"), false)?,
                redis_url: get_env("REDIS_URL", Some("redis://localhost:6379"), is_prod)?,
            },
            jwt: JwtConfig {
                access_secret: get_env("JWT_ACCESS_SECRET", None, is_prod)?,
                refresh_secret: get_env("JWT_REFRESH_SECRET", None, is_prod)?,
                access_exp_days: parse_env("JWT_ACCESS_EXP_DAYS", Some("7"), false)?,
                refresh_exp_days: parse_env("JWT_REFRESH_EXP_DAYS", Some("14"), false)?,
            },
            captcha: CaptchaConfig {
                ttl_seconds: parse_env("CAPTCHA_TTL_SECONDS", Some("900"), false)?,
                cache_timeout_ms: parse_env("CAPTCHA_CACHE_TIMEOUT_MS", Some("2000"), false)?,
                fixed_code: optional_env("CAPTCHA_FIXED_CODE"),
            },
            organization: OrganizationConfig {
                default_avatar: get_env(
                    "DEFAULT_ORG_AVATAR",
                    Some("https://static.project.local/avatar/default.png"),
                    false,
                )?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt.access_exp_days <= 0 || self.jwt.refresh_exp_days <= 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "JWT_ACCESS_EXP_DAYS and JWT_REFRESH_EXP_DAYS must be positive"
            )));
        }

        if self.jwt.access_secret == self.jwt.refresh_secret {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "JWT_ACCESS_SECRET and JWT_REFRESH_SECRET must differ"
            )));
        }

        if self.captcha.ttl_seconds == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "CAPTCHA_TTL_SECONDS must be positive"
            )));
        }

        // In production, ensure stricter validation
        if self.environment.is_prod() {
            if self.captcha.fixed_code.is_some() {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "CAPTCHA_FIXED_CODE is not allowed in production"
                )));
            }

            if self.cache.backend == CacheBackend::Memory {
                tracing::warn!("In-process cache configured in production; codes are not shared between replicas");
            }
        }

        Ok(())
    }
}
