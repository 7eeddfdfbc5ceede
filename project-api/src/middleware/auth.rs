use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use project_common::error_code::ErrorCode;

use crate::{models::ApiError, AppState};

pub const ORGANIZATION_CODE_HEADER: &str = "organizationCode";

/// Caller identity resolved from the bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentMember {
    pub member_id: i64,
    /// Forwarded from the `organizationCode` header; empty when absent.
    pub organization_code: String,
}

/// Require a valid access token on every request passing through.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(ApiError(ErrorCode::Unauthorized))?;

    let claims = state.access_key.verify(token).map_err(|e| {
        tracing::debug!(error = %e, "Rejected access token");
        ApiError(ErrorCode::Unauthorized)
    })?;

    let member_id = claims.sub.parse::<i64>().map_err(|_| {
        tracing::warn!(subject = %claims.sub, "Access token subject is not a member id");
        ApiError(ErrorCode::Unauthorized)
    })?;

    let organization_code = req
        .headers()
        .get(ORGANIZATION_CODE_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    tracing::Span::current().record("member_id", member_id);

    req.extensions_mut().insert(CurrentMember {
        member_id,
        organization_code,
    });

    Ok(next.run(req).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentMember
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentMember>()
            .cloned()
            .ok_or(ApiError(ErrorCode::Unauthorized))
    }
}
