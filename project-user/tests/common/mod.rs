//! Test helper module for project-user integration tests.
//!
//! Wires the login service to the in-memory cache and store so no external
//! services are needed.

#![allow(dead_code)]

use project_common::config::Environment;
use project_user::{
    config::{
        CacheBackend, CacheConfig, CaptchaConfig, DatabaseConfig, JwtConfig, OrganizationConfig,
        UserConfig,
    },
    grpc::proto::user::login_service_client::LoginServiceClient,
    services::{registration_key, CodeCache, MemoryCache, MemoryStore, MockNotifier},
    Application,
};
use std::sync::Arc;
use std::time::Duration;
use tonic::transport::Channel;

pub const TEST_MOBILE: &str = "13800000000";
pub const TEST_CODE: &str = "123456";
pub const ACCESS_SECRET: &str = "test-access-secret";
pub const REFRESH_SECRET: &str = "test-refresh-secret";

pub fn test_config() -> UserConfig {
    UserConfig {
        environment: Environment::Dev,
        service_name: "project-user-test".to_string(),
        service_version: "0.1.0".to_string(),
        log_level: "debug".to_string(),
        otlp_endpoint: None,
        grpc_port: 0,
        grpc_request_timeout_ms: 5000,
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        cache: CacheConfig {
            backend: CacheBackend::Memory,
            redis_url: "redis://unused".to_string(),
        },
        jwt: JwtConfig {
            access_secret: ACCESS_SECRET.to_string(),
            refresh_secret: REFRESH_SECRET.to_string(),
            access_exp_days: 7,
            refresh_exp_days: 14,
        },
        captcha: CaptchaConfig {
            ttl_seconds: 900,
            cache_timeout_ms: 2000,
            fixed_code: Some(TEST_CODE.to_string()),
        },
        organization: OrganizationConfig {
            default_avatar: "https://static.test/avatar.png".to_string(),
        },
    }
}

/// Test application with running gRPC server.
pub struct TestApp {
    pub grpc_port: u16,
    pub app_service: project_user::services::LoginService,
    pub cache: Arc<MemoryCache>,
    pub store: Arc<MemoryStore>,
    pub notifier: Arc<MockNotifier>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(test_config()).await
    }

    pub async fn spawn_with(config: UserConfig) -> Self {
        let cache = Arc::new(MemoryCache::new());
        let store = Arc::new(MemoryStore::new());
        let notifier = Arc::new(MockNotifier::new());

        let app = Application::build_with(config, cache.clone(), store.clone(), notifier.clone())
            .await
            .expect("Failed to build application");
        let grpc_port = app.port();
        let app_service = app.service().clone();

        tokio::spawn(async move {
            let _ = app.run_until_stopped().await;
        });

        TestApp {
            grpc_port,
            app_service,
            cache,
            store,
            notifier,
        }
    }

    /// Get the gRPC endpoint address.
    pub fn grpc_addr(&self) -> String {
        format!("http://127.0.0.1:{}", self.grpc_port)
    }

    /// Create a LoginService client.
    pub async fn login_client(&self) -> LoginServiceClient<Channel> {
        let mut attempts = 0;
        loop {
            match LoginServiceClient::connect(self.grpc_addr()).await {
                Ok(client) => return client,
                Err(e) if attempts < 20 => {
                    attempts += 1;
                    tracing::debug!(error = %e, "gRPC server not ready yet");
                    tokio::time::sleep(Duration::from_millis(25)).await;
                }
                Err(e) => panic!("Failed to connect to gRPC server: {}", e),
            }
        }
    }

    /// Store a registration code directly.
    pub async fn seed_code(&self, mobile: &str, code: &str) {
        self.cache
            .put(&registration_key(mobile), code, Duration::from_secs(900))
            .await
            .expect("Failed to seed code");
    }
}

/// Wait until the detached delivery task has written the code for `mobile`.
pub async fn wait_for_code(cache: &MemoryCache, mobile: &str) -> Option<String> {
    for _ in 0..100 {
        if let Ok(Some(code)) = cache.get(&registration_key(mobile)).await {
            return Some(code);
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    None
}
