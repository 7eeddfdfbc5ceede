use project_common::auth::TokenError;
use project_common::error_code::ErrorCode;
use project_common::grpc::{status_with_code, IntoStatus};
use thiserror::Error;
use tonic::Status;

use super::cache::CacheError;
use super::store::StoreError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid mobile number")]
    InvalidMobile,

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Verification code mismatch")]
    CodeMismatch,

    #[error("Verification code not found")]
    CodeNotFound,

    #[error("Email already registered")]
    EmailExists,

    #[error("Account already registered")]
    AccountExists,

    #[error("Mobile already registered")]
    MobileExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ServiceError::InvalidMobile => ErrorCode::InvalidMobile,
            ServiceError::InvalidParams(_) => ErrorCode::InvalidParams,
            ServiceError::CodeMismatch => ErrorCode::CodeMismatch,
            ServiceError::CodeNotFound => ErrorCode::CodeNotFound,
            ServiceError::EmailExists => ErrorCode::EmailExists,
            ServiceError::AccountExists => ErrorCode::AccountExists,
            ServiceError::MobileExists => ErrorCode::MobileExists,
            ServiceError::InvalidCredentials => ErrorCode::InvalidCredentials,
            ServiceError::Cache(_) => ErrorCode::CacheUnavailable,
            ServiceError::Store(_) => ErrorCode::PersistenceError,
            ServiceError::Token(_) | ServiceError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

impl IntoStatus for ServiceError {
    fn into_status(self) -> Status {
        let code = self.error_code();
        match &self {
            ServiceError::Cache(_)
            | ServiceError::Store(_)
            | ServiceError::Token(_)
            | ServiceError::Internal(_) => {
                // Log the full error but don't expose it to clients
                tracing::error!(error = %self, code = code.code(), "Request failed");
                status_with_code(code, format!("{:?}", code))
            }
            _ => status_with_code(code, self.to_string()),
        }
    }
}

impl From<ServiceError> for Status {
    fn from(err: ServiceError) -> Self {
        err.into_status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use project_common::grpc::error_code_from_status;
    use tonic::Code;

    #[test]
    fn conflicts_carry_their_business_code() {
        let status: Status = ServiceError::MobileExists.into();
        assert_eq!(status.code(), Code::AlreadyExists);
        assert_eq!(error_code_from_status(&status), ErrorCode::MobileExists);
    }

    #[test]
    fn store_failures_hide_details() {
        let err = ServiceError::Store(StoreError::Unavailable("pool closed".to_string()));
        let status: Status = err.into();
        assert_eq!(status.code(), Code::Internal);
        assert!(!status.message().contains("pool closed"));
        assert_eq!(error_code_from_status(&status), ErrorCode::PersistenceError);
    }

    #[test]
    fn cache_failures_map_to_cache_unavailable() {
        let err = ServiceError::Cache(CacheError::Unavailable("down".to_string()));
        assert_eq!(err.error_code(), ErrorCode::CacheUnavailable);
    }
}
