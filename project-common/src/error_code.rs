//! Stable business error codes shared by the internal services and the gateway.
//!
//! Internal services only ever attach an [`ErrorCode`] to a failed RPC; the
//! gateway is the single place that turns a code into the external
//! `(code, message)` pair using [`ErrorCode::message`].

use serde::Serialize;
use tonic::Code;

/// Coarse error taxonomy every business error falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Conflict,
    Auth,
    CacheUnavailable,
    Persistence,
    UpstreamTimeout,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidMobile,
    InvalidParams,
    CodeMismatch,
    CodeNotFound,
    EmailExists,
    AccountExists,
    MobileExists,
    InvalidCredentials,
    Unauthorized,
    CacheUnavailable,
    PersistenceError,
    UpstreamTimeout,
    InternalError,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 13] = [
        ErrorCode::InvalidMobile,
        ErrorCode::InvalidParams,
        ErrorCode::CodeMismatch,
        ErrorCode::CodeNotFound,
        ErrorCode::EmailExists,
        ErrorCode::AccountExists,
        ErrorCode::MobileExists,
        ErrorCode::InvalidCredentials,
        ErrorCode::Unauthorized,
        ErrorCode::CacheUnavailable,
        ErrorCode::PersistenceError,
        ErrorCode::UpstreamTimeout,
        ErrorCode::InternalError,
    ];

    /// Numeric code carried in the gateway envelope.
    pub fn code(self) -> i32 {
        match self {
            ErrorCode::InvalidMobile => 2001,
            ErrorCode::InvalidParams => 2002,
            ErrorCode::CodeMismatch => 2003,
            ErrorCode::CodeNotFound => 2004,
            ErrorCode::EmailExists => 2005,
            ErrorCode::AccountExists => 2006,
            ErrorCode::MobileExists => 2007,
            ErrorCode::InvalidCredentials => 2008,
            ErrorCode::Unauthorized => 401,
            ErrorCode::CacheUnavailable => 997,
            ErrorCode::PersistenceError => 998,
            ErrorCode::UpstreamTimeout => 504,
            ErrorCode::InternalError => 500,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// User-facing message. Only the gateway should call this.
    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::InvalidMobile => "Invalid mobile number",
            ErrorCode::InvalidParams => "Invalid request parameters",
            ErrorCode::CodeMismatch => "Verification code is incorrect",
            ErrorCode::CodeNotFound => "Verification code does not exist or has expired",
            ErrorCode::EmailExists => "Email is already registered",
            ErrorCode::AccountExists => "Account is already registered",
            ErrorCode::MobileExists => "Mobile number is already registered",
            ErrorCode::InvalidCredentials => "Incorrect account or password",
            ErrorCode::Unauthorized => "Not logged in",
            ErrorCode::CacheUnavailable => "Cache service unavailable",
            ErrorCode::PersistenceError => "Database error",
            ErrorCode::UpstreamTimeout => "Upstream service timed out",
            ErrorCode::InternalError => "Internal server error",
        }
    }

    pub fn category(self) -> ErrorCategory {
        match self {
            ErrorCode::InvalidMobile | ErrorCode::InvalidParams | ErrorCode::CodeMismatch => {
                ErrorCategory::Validation
            }
            ErrorCode::CodeNotFound => ErrorCategory::NotFound,
            ErrorCode::EmailExists | ErrorCode::AccountExists | ErrorCode::MobileExists => {
                ErrorCategory::Conflict
            }
            ErrorCode::InvalidCredentials | ErrorCode::Unauthorized => ErrorCategory::Auth,
            ErrorCode::CacheUnavailable => ErrorCategory::CacheUnavailable,
            ErrorCode::PersistenceError => ErrorCategory::Persistence,
            ErrorCode::UpstreamTimeout => ErrorCategory::UpstreamTimeout,
            ErrorCode::InternalError => ErrorCategory::Internal,
        }
    }

    /// gRPC status code used when this error crosses a service boundary.
    pub fn grpc_code(self) -> Code {
        match self.category() {
            ErrorCategory::Validation => Code::InvalidArgument,
            ErrorCategory::NotFound => Code::NotFound,
            ErrorCategory::Conflict => Code::AlreadyExists,
            ErrorCategory::Auth => Code::Unauthenticated,
            ErrorCategory::CacheUnavailable => Code::Unavailable,
            ErrorCategory::Persistence | ErrorCategory::Internal => Code::Internal,
            ErrorCategory::UpstreamTimeout => Code::DeadlineExceeded,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}
