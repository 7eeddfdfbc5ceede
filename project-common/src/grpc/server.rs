//! gRPC server builder utilities.
//!
//! Provides a builder for configuring tonic servers with the standard
//! keepalive settings plus the health and reflection services.

use std::time::Duration;

use tonic::server::NamedService;
use tonic::transport::Server;
use tonic_health::pb::health_server::{Health, HealthServer};
use tonic_reflection::server::Builder as ReflectionBuilder;

/// Builder for configuring a gRPC server with standard middleware.
pub struct GrpcServerBuilder {
    service_name: String,
    enable_reflection: bool,
    enable_health: bool,
    http2_keepalive_interval: Option<Duration>,
    http2_keepalive_timeout: Option<Duration>,
    concurrency_limit: Option<usize>,
    request_timeout: Option<Duration>,
}

impl GrpcServerBuilder {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            enable_reflection: true,
            enable_health: true,
            http2_keepalive_interval: Some(Duration::from_secs(30)),
            http2_keepalive_timeout: Some(Duration::from_secs(10)),
            concurrency_limit: None,
            request_timeout: None,
        }
    }

    /// Enable or disable gRPC reflection (enabled by default).
    pub fn with_reflection(mut self, enable: bool) -> Self {
        self.enable_reflection = enable;
        self
    }

    /// Enable or disable the health service (enabled by default).
    pub fn with_health(mut self, enable: bool) -> Self {
        self.enable_health = enable;
        self
    }

    pub fn with_concurrency_limit(mut self, limit: usize) -> Self {
        self.concurrency_limit = Some(limit);
        self
    }

    /// Upper bound on handling one call, on top of any client `grpc-timeout`.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn reflection_enabled(&self) -> bool {
        self.enable_reflection
    }

    pub fn health_enabled(&self) -> bool {
        self.enable_health
    }

    /// Build a tonic Server with the configured settings.
    pub fn build_server(&self) -> Server {
        let mut server = Server::builder();

        if let Some(interval) = self.http2_keepalive_interval {
            server = server.http2_keepalive_interval(Some(interval));
        }

        if let Some(timeout) = self.http2_keepalive_timeout {
            server = server.http2_keepalive_timeout(Some(timeout));
        }

        if let Some(limit) = self.concurrency_limit {
            server = server.concurrency_limit_per_connection(limit);
        }

        if let Some(timeout) = self.request_timeout {
            server = server.timeout(timeout);
        }

        server
    }
}

/// Create a reflection service from encoded file descriptor sets.
///
/// ```ignore
/// let reflection = create_reflection_service(&[proto::FILE_DESCRIPTOR_SET])?;
/// ```
pub fn create_reflection_service(
    file_descriptor_sets: &[&[u8]],
) -> Result<
    tonic_reflection::server::ServerReflectionServer<
        impl tonic_reflection::server::ServerReflection,
    >,
    tonic_reflection::server::Error,
> {
    let mut builder = ReflectionBuilder::configure();

    for fds in file_descriptor_sets {
        builder = builder.register_encoded_file_descriptor_set(fds);
    }

    builder.build_v1()
}

/// Create a `grpc.health.v1` service reporting `S` as serving.
pub async fn create_health_service<S: NamedService>() -> HealthServer<impl Health> {
    let (mut reporter, service) = tonic_health::server::health_reporter();
    reporter.set_serving::<S>().await;
    service
}
