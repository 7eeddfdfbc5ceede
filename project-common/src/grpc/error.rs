//! Conversion between business error codes and `tonic::Status`.
//!
//! A failed RPC carries its gRPC code (derived from the error category) plus
//! the stable business code in the `x-error-code` metadata entry:
//!
//! | Category | gRPC Status |
//! |----------|-------------|
//! | `Validation` | `INVALID_ARGUMENT` |
//! | `NotFound` | `NOT_FOUND` |
//! | `Conflict` | `ALREADY_EXISTS` |
//! | `Auth` | `UNAUTHENTICATED` |
//! | `CacheUnavailable` | `UNAVAILABLE` |
//! | `Persistence` / `Internal` | `INTERNAL` |
//! | `UpstreamTimeout` | `DEADLINE_EXCEEDED` |

use tonic::metadata::MetadataValue;
use tonic::{Code, Status};

use crate::error_code::ErrorCode;

/// Metadata key holding the stable business code of a failed RPC.
pub const ERROR_CODE_KEY: &str = "x-error-code";

/// Extension trait for converting types into `tonic::Status`.
pub trait IntoStatus {
    fn into_status(self) -> Status;
}

impl IntoStatus for ErrorCode {
    fn into_status(self) -> Status {
        status_with_code(self, format!("{:?}", self))
    }
}

/// Build a status for `code`, tagging it with the stable business code.
pub fn status_with_code(code: ErrorCode, detail: impl Into<String>) -> Status {
    let mut status = Status::new(code.grpc_code(), detail);
    status
        .metadata_mut()
        .insert(ERROR_CODE_KEY, MetadataValue::from(code.code()));
    status
}

/// Recover the business code from a failed RPC.
///
/// The `x-error-code` entry wins when present and known. Otherwise the gRPC
/// code decides: deadline and cancellation become `UpstreamTimeout`, everything
/// else `InternalError`.
pub fn error_code_from_status(status: &Status) -> ErrorCode {
    let tagged = status
        .metadata()
        .get(ERROR_CODE_KEY)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<i32>().ok())
        .and_then(ErrorCode::from_code);

    if let Some(code) = tagged {
        return code;
    }

    match status.code() {
        Code::DeadlineExceeded | Code::Cancelled => ErrorCode::UpstreamTimeout,
        Code::Unauthenticated => ErrorCode::Unauthorized,
        Code::InvalidArgument => ErrorCode::InvalidParams,
        _ => ErrorCode::InternalError,
    }
}
