#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use project_api::services::{ProjectRpc, UserRpc};
use project_api::{build_router, AppState};
use project_common::auth::{TokenIssuer, TokenKey};
use project_common::error_code::ErrorCode;
use project_common::grpc::proto::project::{
    IndexResponse, MenuMessage, MyProjectResponse, ProjectDetailResponse, ProjectMessage,
    ProjectRpcRequest, ProjectTemplateResponse, SaveProjectResponse,
};
use project_common::grpc::proto::user::{
    CaptchaResponse, LoginResponse, MemberMessage, OrganizationMessage, RegisterRequest,
    RegisterResponse, TokenMessage,
};
use project_common::grpc::status_with_code;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tonic::Status;
use tower::ServiceExt;

pub const ACCESS_SECRET: &str = "gateway-test-access-secret";
pub const REFRESH_SECRET: &str = "gateway-test-refresh-secret";
pub const TEST_DEADLINE: Duration = Duration::from_millis(100);

/// How a fake upstream answers.
#[derive(Clone, Copy, Debug)]
pub enum Behavior {
    Succeed,
    Fail(ErrorCode),
    Hang,
}

impl Behavior {
    async fn run<T>(self, ok: T) -> Result<T, Status> {
        match self {
            Behavior::Succeed => Ok(ok),
            Behavior::Fail(code) => Err(status_with_code(code, format!("{:?}", code))),
            Behavior::Hang => std::future::pending().await,
        }
    }
}

pub struct FakeUserRpc {
    pub behavior: Behavior,
    pub registrations: Mutex<Vec<RegisterRequest>>,
}

impl FakeUserRpc {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            registrations: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl UserRpc for FakeUserRpc {
    async fn get_captcha(&self, _mobile: String) -> Result<CaptchaResponse, Status> {
        self.behavior
            .run(CaptchaResponse {
                code: "123456".to_string(),
            })
            .await
    }

    async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse, Status> {
        self.registrations.lock().unwrap().push(request);
        self.behavior.run(RegisterResponse {}).await
    }

    async fn login(&self, account: String, _password: String) -> Result<LoginResponse, Status> {
        self.behavior
            .run(LoginResponse {
                member: Some(MemberMessage {
                    id: 7,
                    account: account.clone(),
                    name: account,
                    mobile: "13800000000".to_string(),
                    email: "alice@example.com".to_string(),
                    status: 1,
                    create_time: 1_700_000_000_000,
                    last_login_time: 1_700_000_000_000,
                }),
                organization_list: vec![OrganizationMessage {
                    id: 11,
                    name: "alice's personal workspace".to_string(),
                    avatar: "https://static.project.local/avatar/default.png".to_string(),
                    member_id: 7,
                    create_time: 1_700_000_000_000,
                    personal: 1,
                }],
                token_list: Some(TokenMessage {
                    access_token: "access".to_string(),
                    refresh_token: "refresh".to_string(),
                    token_type: "bearer".to_string(),
                    access_token_exp: 1_700_604_800,
                }),
            })
            .await
    }
}

pub struct FakeProjectRpc {
    pub behavior: Behavior,
    pub projects: Vec<ProjectMessage>,
    pub requests: Mutex<Vec<ProjectRpcRequest>>,
}

impl FakeProjectRpc {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            projects: Vec::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_projects(mut self, projects: Vec<ProjectMessage>) -> Self {
        self.projects = projects;
        self
    }

    pub fn last_request(&self) -> ProjectRpcRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no project request recorded")
    }

    fn record(&self, request: ProjectRpcRequest) {
        self.requests.lock().unwrap().push(request);
    }
}

#[async_trait]
impl ProjectRpc for FakeProjectRpc {
    async fn index(&self) -> Result<IndexResponse, Status> {
        self.behavior
            .run(IndexResponse {
                menus: vec![MenuMessage {
                    id: 1,
                    title: "Workbench".to_string(),
                    children: vec![MenuMessage {
                        id: 2,
                        pid: 1,
                        title: "Overview".to_string(),
                        ..Default::default()
                    }],
                    ..Default::default()
                }],
            })
            .await
    }

    async fn find_project_by_mem_id(
        &self,
        request: ProjectRpcRequest,
    ) -> Result<MyProjectResponse, Status> {
        self.record(request);
        self.behavior
            .run(MyProjectResponse {
                pm: self.projects.clone(),
                total: self.projects.len() as i64,
            })
            .await
    }

    async fn find_project_template(
        &self,
        request: ProjectRpcRequest,
    ) -> Result<ProjectTemplateResponse, Status> {
        self.record(request);
        self.behavior
            .run(ProjectTemplateResponse {
                ptm: vec![],
                total: 0,
            })
            .await
    }

    async fn save_project(
        &self,
        request: ProjectRpcRequest,
    ) -> Result<SaveProjectResponse, Status> {
        let rsp = SaveProjectResponse {
            id: 99,
            code: "p-99".to_string(),
            name: request.name.clone(),
            description: request.description.clone(),
            organization_code: request.organization_code.clone(),
            ..Default::default()
        };
        self.record(request);
        self.behavior.run(rsp).await
    }

    async fn find_project_detail(
        &self,
        request: ProjectRpcRequest,
    ) -> Result<ProjectDetailResponse, Status> {
        let rsp = ProjectDetailResponse {
            code: request.project_code.clone(),
            name: "Roadmap".to_string(),
            ..Default::default()
        };
        self.record(request);
        self.behavior.run(rsp).await
    }
}

pub struct TestGateway {
    pub router: Router,
    pub user_rpc: Arc<FakeUserRpc>,
    pub project_rpc: Arc<FakeProjectRpc>,
}

impl TestGateway {
    pub fn new(user_rpc: FakeUserRpc, project_rpc: FakeProjectRpc) -> Self {
        let user_rpc = Arc::new(user_rpc);
        let project_rpc = Arc::new(project_rpc);
        let state = AppState::new(
            user_rpc.clone(),
            project_rpc.clone(),
            TokenKey::verifier(ACCESS_SECRET),
            TEST_DEADLINE,
        );

        Self {
            router: build_router(state),
            user_rpc,
            project_rpc,
        }
    }

    pub fn succeeding() -> Self {
        Self::new(
            FakeUserRpc::new(Behavior::Succeed),
            FakeProjectRpc::new(Behavior::Succeed),
        )
    }

    /// POST a form body and return the HTTP status with the parsed envelope.
    pub async fn post_form(
        &self,
        path: &str,
        form: &[(&str, &str)],
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        self.post_form_with_headers(path, form, token, &[]).await
    }

    pub async fn post_form_with_headers(
        &self,
        path: &str,
        form: &[(&str, &str)],
        token: Option<&str>,
        headers: &[(&str, &str)],
    ) -> (StatusCode, Value) {
        let body = serde_urlencoded::to_string(form).unwrap();
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let response = self
            .router
            .clone()
            .oneshot(builder.body(Body::from(body)).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}

/// Access token for `member_id` signed with the gateway's secret.
pub fn access_token(member_id: i64) -> String {
    TokenIssuer::new(
        ACCESS_SECRET,
        chrono::Duration::days(7),
        REFRESH_SECRET,
        chrono::Duration::days(14),
    )
    .issue(&member_id.to_string())
    .unwrap()
    .access_token
}

pub fn assert_failure(body: &Value, code: ErrorCode) {
    assert_eq!(body["code"], code.code(), "unexpected envelope: {}", body);
    assert_eq!(body["message"], code.message());
    assert!(body.get("data").is_none(), "failure carried data: {}", body);
}
