use axum::extract::State;

use crate::middleware::ValidForm;
use crate::models::user::{CaptchaForm, LoginForm, LoginRsp, RegisterForm};
use crate::models::{ApiError, ApiResult};
use crate::services::call_rpc;
use crate::AppState;

/// Returns the issued code as `data`.
#[tracing::instrument(skip_all)]
pub async fn get_captcha(
    State(state): State<AppState>,
    ValidForm(form): ValidForm<CaptchaForm>,
) -> Result<ApiResult<String>, ApiError> {
    let rsp = call_rpc(
        "GetCaptcha",
        state.rpc_timeout,
        state.user_rpc.get_captcha(form.mobile),
    )
    .await?;

    Ok(ApiResult::success(rsp.code))
}

#[tracing::instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    ValidForm(form): ValidForm<RegisterForm>,
) -> Result<ApiResult<()>, ApiError> {
    call_rpc(
        "Register",
        state.rpc_timeout,
        state.user_rpc.register(form.into()),
    )
    .await?;

    Ok(ApiResult::ok())
}

#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ValidForm(form): ValidForm<LoginForm>,
) -> Result<ApiResult<LoginRsp>, ApiError> {
    let rsp = call_rpc(
        "Login",
        state.rpc_timeout,
        state.user_rpc.login(form.account, form.password),
    )
    .await?;

    Ok(ApiResult::success(LoginRsp::from(rsp)))
}
