use project_common::config::{get_env, optional_env, parse_env, Config, Environment};
use project_common::error::AppError;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub environment: Environment,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub host: String,
    pub port: u16,
    pub user_service: UpstreamConfig,
    pub project_service: UpstreamConfig,
    pub rpc_timeout_ms: u64,
    /// Must match the user service's access secret; only used to verify.
    pub jwt_access_secret: String,
}

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// gRPC endpoint (e.g., http://project-user:50051).
    pub grpc_url: String,
    pub connect_timeout_ms: u64,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env()?;
        let is_prod = environment.is_prod();
        let shared = Config::load()?;

        let config = GatewayConfig {
            environment,
            service_name: get_env("SERVICE_NAME", Some("project-api"), is_prod)?,
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
            otlp_endpoint: optional_env("OTLP_ENDPOINT"),
            host: get_env("APP_HOST", Some("0.0.0.0"), false)?,
            port: shared.port,
            user_service: UpstreamConfig {
                grpc_url: get_env(
                    "USER_SERVICE_GRPC_URL",
                    Some("http://localhost:50051"),
                    is_prod,
                )?,
                connect_timeout_ms: parse_env("RPC_CONNECT_TIMEOUT_MS", Some("5000"), false)?,
            },
            project_service: UpstreamConfig {
                grpc_url: get_env(
                    "PROJECT_SERVICE_GRPC_URL",
                    Some("http://localhost:50052"),
                    is_prod,
                )?,
                connect_timeout_ms: parse_env("RPC_CONNECT_TIMEOUT_MS", Some("5000"), false)?,
            },
            rpc_timeout_ms: parse_env("RPC_TIMEOUT_MS", Some("2000"), false)?,
            jwt_access_secret: get_env("JWT_ACCESS_SECRET", None, is_prod)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.rpc_timeout_ms == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "RPC_TIMEOUT_MS must be positive"
            )));
        }

        if self.jwt_access_secret.trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "JWT_ACCESS_SECRET must not be empty"
            )));
        }

        Ok(())
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_millis(self.rpc_timeout_ms)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl UpstreamConfig {
    pub fn client_config(&self, request_timeout: Duration) -> project_common::grpc::ClientConfig {
        project_common::grpc::ClientConfig {
            endpoint: self.grpc_url.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GatewayConfig {
        GatewayConfig {
            environment: Environment::Dev,
            service_name: "project-api".to_string(),
            log_level: "info".to_string(),
            otlp_endpoint: None,
            host: "127.0.0.1".to_string(),
            port: 8080,
            user_service: UpstreamConfig {
                grpc_url: "http://localhost:50051".to_string(),
                connect_timeout_ms: 5000,
            },
            project_service: UpstreamConfig {
                grpc_url: "http://localhost:50052".to_string(),
                connect_timeout_ms: 5000,
            },
            rpc_timeout_ms: 2000,
            jwt_access_secret: "access-secret".to_string(),
        }
    }

    #[test]
    fn default_deadline_is_two_seconds() {
        assert_eq!(config().rpc_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn rejects_zero_deadline() {
        let mut config = config();
        config.rpc_timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn client_config_carries_deadline() {
        let config = config();
        let client = config.user_service.client_config(config.rpc_timeout());
        assert_eq!(client.endpoint, "http://localhost:50051");
        assert_eq!(client.request_timeout, Duration::from_secs(2));
        assert_eq!(client.connect_timeout, Duration::from_secs(5));
    }
}
