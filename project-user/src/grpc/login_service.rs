//! gRPC implementation of LoginService.

use project_common::grpc::IntoStatus;
use tonic::{Request, Response, Status};

use crate::grpc::proto::user::{
    login_service_server, CaptchaRequest, CaptchaResponse, LoginRequest, LoginResponse,
    MemberMessage, OrganizationMessage, RegisterRequest, RegisterResponse, TokenMessage,
};
use crate::models::{Member, Organization};
use crate::services::{LoginOutput, LoginService, RegisterInput};

pub struct LoginServiceImpl {
    service: LoginService,
}

impl LoginServiceImpl {
    pub fn new(service: LoginService) -> Self {
        Self { service }
    }
}

impl From<Member> for MemberMessage {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            account: member.account,
            name: member.name,
            mobile: member.mobile,
            email: member.email,
            status: member.status,
            create_time: member.create_time,
            last_login_time: member.last_login_time,
        }
    }
}

impl From<Organization> for OrganizationMessage {
    fn from(org: Organization) -> Self {
        Self {
            id: org.id,
            name: org.name,
            avatar: org.avatar,
            member_id: org.member_id,
            create_time: org.create_time,
            personal: org.personal,
        }
    }
}

impl From<LoginOutput> for LoginResponse {
    fn from(output: LoginOutput) -> Self {
        Self {
            member: Some(output.member.into()),
            organization_list: output.organizations.into_iter().map(Into::into).collect(),
            token_list: Some(TokenMessage {
                access_token: output.tokens.access_token,
                refresh_token: output.tokens.refresh_token,
                token_type: output.token_type.to_string(),
                access_token_exp: output.tokens.access_token_exp,
            }),
        }
    }
}

#[tonic::async_trait]
impl login_service_server::LoginService for LoginServiceImpl {
    async fn get_captcha(
        &self,
        request: Request<CaptchaRequest>,
    ) -> Result<Response<CaptchaResponse>, Status> {
        let req = request.into_inner();

        let code = self
            .service
            .get_captcha(&req.mobile)
            .map_err(|e| e.into_status())?;

        Ok(Response::new(CaptchaResponse { code }))
    }

    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let req = request.into_inner();

        let input = RegisterInput {
            email: req.email,
            name: req.name,
            password: req.password,
            mobile: req.mobile,
            captcha: req.captcha,
        };

        self.service
            .register(input)
            .await
            .map_err(|e| e.into_status())?;

        Ok(Response::new(RegisterResponse {}))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let req = request.into_inner();

        let output = self
            .service
            .login(&req.account, &req.password)
            .await
            .map_err(|e| e.into_status())?;

        Ok(Response::new(output.into()))
    }
}
