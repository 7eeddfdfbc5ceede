use project_common::grpc::proto::user::{
    LoginResponse, MemberMessage, OrganizationMessage, RegisterRequest, TokenMessage,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CaptchaForm {
    /// Format is checked by the user service so it can answer `InvalidMobile`.
    #[serde(default)]
    pub mobile: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[serde(default)]
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
    #[serde(default)]
    #[validate(must_match(other = "password"))]
    pub password2: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub mobile: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 16))]
    pub captcha: String,
}

impl From<RegisterForm> for RegisterRequest {
    fn from(form: RegisterForm) -> Self {
        RegisterRequest {
            email: form.email,
            name: form.name,
            password: form.password,
            mobile: form.mobile,
            captcha: form.captcha,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub account: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i64,
    pub account: String,
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub status: i32,
    pub create_time: i64,
    pub last_login_time: i64,
}

impl From<MemberMessage> for Member {
    fn from(m: MemberMessage) -> Self {
        Member {
            id: m.id,
            account: m.account,
            name: m.name,
            mobile: m.mobile,
            email: m.email,
            status: m.status,
            create_time: m.create_time,
            last_login_time: m.last_login_time,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub avatar: String,
    pub member_id: i64,
    pub create_time: i64,
    pub personal: i32,
}

impl From<OrganizationMessage> for Organization {
    fn from(o: OrganizationMessage) -> Self {
        Organization {
            id: o.id,
            name: o.name,
            avatar: o.avatar,
            member_id: o.member_id,
            create_time: o.create_time,
            personal: o.personal,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenList {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Unix seconds.
    pub access_token_exp: i64,
}

impl From<TokenMessage> for TokenList {
    fn from(t: TokenMessage) -> Self {
        TokenList {
            access_token: t.access_token,
            refresh_token: t.refresh_token,
            token_type: t.token_type,
            access_token_exp: t.access_token_exp,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginRsp {
    pub member: Member,
    pub token_list: TokenList,
    pub organization_list: Vec<Organization>,
}

impl From<LoginResponse> for LoginRsp {
    fn from(rsp: LoginResponse) -> Self {
        LoginRsp {
            member: rsp.member.map(Member::from).unwrap_or_default(),
            token_list: rsp.token_list.map(TokenList::from).unwrap_or_default(),
            organization_list: rsp
                .organization_list
                .into_iter()
                .map(Organization::from)
                .collect(),
        }
    }
}
