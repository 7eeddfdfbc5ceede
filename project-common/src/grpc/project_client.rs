//! Project service gRPC client used by the gateway.

use tonic::transport::Channel;

use super::proto::project::project_service_client::ProjectServiceClient;
use super::proto::project::{
    IndexRequest, IndexResponse, MyProjectResponse, ProjectDetailResponse, ProjectRpcRequest,
    ProjectTemplateResponse, SaveProjectResponse,
};
use super::user_client::ClientConfig;

#[derive(Clone)]
pub struct ProjectClient {
    client: ProjectServiceClient<Channel>,
    config: ClientConfig,
}

impl ProjectClient {
    /// Create a client whose channel connects on first call.
    pub fn lazy(config: ClientConfig) -> Result<Self, tonic::transport::Error> {
        let channel = config.lazy_channel()?;
        Ok(Self {
            client: ProjectServiceClient::new(channel),
            config,
        })
    }

    pub async fn index(&self) -> Result<IndexResponse, tonic::Status> {
        let request = self.config.request(IndexRequest {});
        Ok(self.client.clone().index(request).await?.into_inner())
    }

    pub async fn find_project_by_mem_id(
        &self,
        message: ProjectRpcRequest,
    ) -> Result<MyProjectResponse, tonic::Status> {
        let request = self.config.request(message);
        Ok(self
            .client
            .clone()
            .find_project_by_mem_id(request)
            .await?
            .into_inner())
    }

    pub async fn find_project_template(
        &self,
        message: ProjectRpcRequest,
    ) -> Result<ProjectTemplateResponse, tonic::Status> {
        let request = self.config.request(message);
        Ok(self
            .client
            .clone()
            .find_project_template(request)
            .await?
            .into_inner())
    }

    pub async fn save_project(
        &self,
        message: ProjectRpcRequest,
    ) -> Result<SaveProjectResponse, tonic::Status> {
        let request = self.config.request(message);
        Ok(self.client.clone().save_project(request).await?.into_inner())
    }

    pub async fn find_project_detail(
        &self,
        message: ProjectRpcRequest,
    ) -> Result<ProjectDetailResponse, tonic::Status> {
        let request = self.config.request(message);
        Ok(self
            .client
            .clone()
            .find_project_detail(request)
            .await?
            .into_inner())
    }
}
