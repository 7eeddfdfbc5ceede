//! Login service gRPC client used by the gateway.

use std::time::Duration;
use tonic::Request;
use tonic::transport::{Channel, Endpoint};

use super::proto::user::login_service_client::LoginServiceClient;
use super::proto::user::{
    CaptchaRequest, CaptchaResponse, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse,
};

/// Connection and deadline settings shared by the gateway's gRPC clients.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// The gRPC endpoint (e.g., "http://project-user:50051").
    pub endpoint: String,
    pub connect_timeout: Duration,
    /// Deadline attached to every call.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:50051".to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(2),
        }
    }
}

impl ClientConfig {
    /// Build a channel that connects on first use.
    pub fn lazy_channel(&self) -> Result<Channel, tonic::transport::Error> {
        Ok(Endpoint::from_shared(self.endpoint.clone())?
            .connect_timeout(self.connect_timeout)
            .timeout(self.request_timeout)
            .connect_lazy())
    }

    pub(crate) fn request<T>(&self, message: T) -> Request<T> {
        let mut request = Request::new(message);
        request.set_timeout(self.request_timeout);
        request
    }
}

#[derive(Clone)]
pub struct UserClient {
    client: LoginServiceClient<Channel>,
    config: ClientConfig,
}

impl UserClient {
    /// Create a client whose channel connects on first call.
    pub fn lazy(config: ClientConfig) -> Result<Self, tonic::transport::Error> {
        let channel = config.lazy_channel()?;
        Ok(Self {
            client: LoginServiceClient::new(channel),
            config,
        })
    }

    pub async fn get_captcha(&self, mobile: String) -> Result<CaptchaResponse, tonic::Status> {
        let request = self.config.request(CaptchaRequest { mobile });
        let response = self.client.clone().get_captcha(request).await?;
        Ok(response.into_inner())
    }

    pub async fn register(&self, message: RegisterRequest) -> Result<RegisterResponse, tonic::Status> {
        let request = self.config.request(message);
        let response = self.client.clone().register(request).await?;
        Ok(response.into_inner())
    }

    pub async fn login(&self, account: String, password: String) -> Result<LoginResponse, tonic::Status> {
        let request = self.config.request(LoginRequest { account, password });
        let response = self.client.clone().login(request).await?;
        Ok(response.into_inner())
    }
}
