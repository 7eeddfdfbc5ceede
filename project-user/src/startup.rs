use project_common::auth::TokenIssuer;
use project_common::error::AppError;
use project_common::grpc::{create_health_service, create_reflection_service, GrpcServerBuilder};
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tonic::transport::server::TcpIncoming;

use crate::config::{CacheBackend, UserConfig};
use crate::grpc::proto::user::{login_service_server::LoginServiceServer, FILE_DESCRIPTOR_SET};
use crate::grpc::LoginServiceImpl;
use crate::services::{
    CodeCache, CodeNotifier, LogNotifier, LoginService, LoginSettings, MemoryCache,
    PostgresStore, RedisCache, Store,
};

type ServerFuture = Pin<Box<dyn Future<Output = Result<(), tonic::transport::Error>> + Send>>;

pub struct Application {
    port: u16,
    server: ServerFuture,
    service: LoginService,
}

impl Application {
    /// Connect to Postgres and the configured cache, then bind the gRPC port.
    pub async fn build(config: UserConfig) -> Result<Self, AppError> {
        let store = PostgresStore::connect(&config.database).await.map_err(|e| {
            tracing::error!("Failed to connect to PostgreSQL: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e))
        })?;
        store.migrate().await.map_err(|e| {
            tracing::error!("Failed to run migrations: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e))
        })?;

        let cache: Arc<dyn CodeCache> = match config.cache.backend {
            CacheBackend::Redis => Arc::new(
                RedisCache::new(&config.cache.redis_url)
                    .await
                    .map_err(|e| AppError::CacheError(anyhow::anyhow!(e)))?,
            ),
            CacheBackend::Memory => Arc::new(MemoryCache::new()),
        };

        Self::build_with(config, cache, Arc::new(store), Arc::new(LogNotifier)).await
    }

    /// Bind the gRPC port around already constructed collaborators.
    pub async fn build_with(
        config: UserConfig,
        cache: Arc<dyn CodeCache>,
        store: Arc<dyn Store>,
        notifier: Arc<dyn CodeNotifier>,
    ) -> Result<Self, AppError> {
        let tokens = TokenIssuer::new(
            &config.jwt.access_secret,
            chrono::Duration::days(config.jwt.access_exp_days),
            &config.jwt.refresh_secret,
            chrono::Duration::days(config.jwt.refresh_exp_days),
        );
        let service = LoginService::new(
            cache,
            store,
            notifier,
            tokens,
            LoginSettings::from(&config),
        );

        let addr = SocketAddr::from(([0, 0, 0, 0], config.grpc_port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();
        let incoming = TcpIncoming::from_listener(listener, true, None)
            .map_err(|e| AppError::InternalError(anyhow::anyhow!(e)))?;

        let builder = GrpcServerBuilder::new(config.service_name.clone())
            .with_request_timeout(Duration::from_millis(config.grpc_request_timeout_ms));
        let reflection = create_reflection_service(&[FILE_DESCRIPTOR_SET])
            .map_err(|e| AppError::InternalError(anyhow::anyhow!(e)))?;
        let health = create_health_service::<LoginServiceServer<LoginServiceImpl>>().await;

        let server = builder
            .build_server()
            .add_optional_service(builder.health_enabled().then_some(health))
            .add_optional_service(builder.reflection_enabled().then_some(reflection))
            .add_service(LoginServiceServer::new(LoginServiceImpl::new(
                service.clone(),
            )))
            .serve_with_incoming(incoming);

        tracing::info!(port, service = %builder.service_name(), "gRPC server listening");

        Ok(Self {
            port,
            server: Box::pin(server),
            service,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn service(&self) -> &LoginService {
        &self.service
    }

    pub async fn run_until_stopped(self) -> Result<(), AppError> {
        self.server.await?;
        Ok(())
    }
}
