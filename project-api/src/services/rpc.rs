//! Seams between the gateway handlers and the internal gRPC services.
//!
//! Handlers talk to [`UserRpc`] and [`ProjectRpc`] rather than to the tonic
//! clients directly, and every call goes through [`call_rpc`] so it is bounded
//! by the gateway deadline and comes back as a stable [`ErrorCode`] on failure.

use async_trait::async_trait;
use project_common::error_code::ErrorCode;
use project_common::grpc::proto::project::{
    IndexResponse, MyProjectResponse, ProjectDetailResponse, ProjectRpcRequest,
    ProjectTemplateResponse, SaveProjectResponse,
};
use project_common::grpc::proto::user::{
    CaptchaResponse, LoginResponse, RegisterRequest, RegisterResponse,
};
use project_common::grpc::{error_code_from_status, ProjectClient, UserClient};
use std::future::Future;
use std::time::Duration;
use tonic::Status;

#[async_trait]
pub trait UserRpc: Send + Sync {
    async fn get_captcha(&self, mobile: String) -> Result<CaptchaResponse, Status>;
    async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse, Status>;
    async fn login(&self, account: String, password: String) -> Result<LoginResponse, Status>;
}

#[async_trait]
pub trait ProjectRpc: Send + Sync {
    async fn index(&self) -> Result<IndexResponse, Status>;
    async fn find_project_by_mem_id(
        &self,
        request: ProjectRpcRequest,
    ) -> Result<MyProjectResponse, Status>;
    async fn find_project_template(
        &self,
        request: ProjectRpcRequest,
    ) -> Result<ProjectTemplateResponse, Status>;
    async fn save_project(
        &self,
        request: ProjectRpcRequest,
    ) -> Result<SaveProjectResponse, Status>;
    async fn find_project_detail(
        &self,
        request: ProjectRpcRequest,
    ) -> Result<ProjectDetailResponse, Status>;
}

#[async_trait]
impl UserRpc for UserClient {
    async fn get_captcha(&self, mobile: String) -> Result<CaptchaResponse, Status> {
        UserClient::get_captcha(self, mobile).await
    }

    async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse, Status> {
        UserClient::register(self, request).await
    }

    async fn login(&self, account: String, password: String) -> Result<LoginResponse, Status> {
        UserClient::login(self, account, password).await
    }
}

#[async_trait]
impl ProjectRpc for ProjectClient {
    async fn index(&self) -> Result<IndexResponse, Status> {
        ProjectClient::index(self).await
    }

    async fn find_project_by_mem_id(
        &self,
        request: ProjectRpcRequest,
    ) -> Result<MyProjectResponse, Status> {
        ProjectClient::find_project_by_mem_id(self, request).await
    }

    async fn find_project_template(
        &self,
        request: ProjectRpcRequest,
    ) -> Result<ProjectTemplateResponse, Status> {
        ProjectClient::find_project_template(self, request).await
    }

    async fn save_project(
        &self,
        request: ProjectRpcRequest,
    ) -> Result<SaveProjectResponse, Status> {
        ProjectClient::save_project(self, request).await
    }

    async fn find_project_detail(
        &self,
        request: ProjectRpcRequest,
    ) -> Result<ProjectDetailResponse, Status> {
        ProjectClient::find_project_detail(self, request).await
    }
}

/// Run one RPC under `deadline`.
///
/// The tonic request already carries the deadline for the server side; the
/// local timeout makes the gateway give up even if the upstream never answers.
pub async fn call_rpc<T, F>(
    operation: &'static str,
    deadline: Duration,
    call: F,
) -> Result<T, ErrorCode>
where
    F: Future<Output = Result<T, Status>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(Ok(response)) => Ok(response),
        Ok(Err(status)) => {
            let code = error_code_from_status(&status);
            tracing::warn!(
                rpc = operation,
                grpc_code = ?status.code(),
                error_code = code.code(),
                detail = %status.message(),
                "Upstream call failed"
            );
            Err(code)
        }
        Err(_) => {
            tracing::warn!(
                rpc = operation,
                deadline_ms = deadline.as_millis() as u64,
                "Upstream call exceeded deadline"
            );
            Err(ErrorCode::UpstreamTimeout)
        }
    }
}
