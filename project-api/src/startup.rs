use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use project_common::auth::TokenKey;
use project_common::error::AppError;
use project_common::grpc::{ProjectClient, UserClient};
use project_common::middleware::{request_id_middleware, REQUEST_ID_HEADER};
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::handlers::{app, login, project};
use crate::middleware::auth_middleware;
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/project/index", post(project::index))
        .route("/project/project/selfList", post(project::self_list))
        .route("/project/project_template", post(project::project_template))
        .route("/project/project/save", post(project::save_project))
        .route("/project/project/read", post(project::read_project))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(app::health_check))
        .route("/project/login/getCaptcha", post(login::get_captcha))
        .route("/project/login/register", post(login::register))
        .route("/project/login", post(login::login))
        .merge(protected)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    member_id = tracing::field::Empty,
                )
            }),
        )
        // Outermost so the trace span sees the generated id
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(config: GatewayConfig) -> Result<Self, AppError> {
        let rpc_timeout = config.rpc_timeout();

        let user_client = UserClient::lazy(config.user_service.client_config(rpc_timeout))
            .map_err(|e| {
                tracing::error!(
                    "Invalid user service endpoint {}: {}",
                    config.user_service.grpc_url,
                    e
                );
                AppError::from(e)
            })?;
        let project_client = ProjectClient::lazy(config.project_service.client_config(rpc_timeout))
            .map_err(|e| {
                tracing::error!(
                    "Invalid project service endpoint {}: {}",
                    config.project_service.grpc_url,
                    e
                );
                AppError::from(e)
            })?;

        let state = AppState::new(
            Arc::new(user_client),
            Arc::new(project_client),
            TokenKey::verifier(&config.jwt_access_secret),
            rpc_timeout,
        );

        Self::build_with(&config, state).await
    }

    /// Serve `state` on the configured address; port 0 picks a free port.
    pub async fn build_with(config: &GatewayConfig, state: AppState) -> Result<Self, AppError> {
        let address = config.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            user_service = %config.user_service.grpc_url,
            project_service = %config.project_service.grpc_url,
            rpc_timeout_ms = config.rpc_timeout_ms,
            "Gateway listening"
        );

        let server = axum::serve(listener, build_router(state));

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
