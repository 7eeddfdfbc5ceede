//! gRPC utilities shared by the project services.
//!
//! - Conversion between business error codes and `tonic::Status`
//! - Server builder, health and reflection helpers
//! - Deadline-bounded clients for the login and project services

pub mod error;
pub mod project_client;
pub mod server;
pub mod user_client;

// Generated client code
pub mod proto {
    pub mod user {
        tonic::include_proto!("project.user.v1");
    }
    pub mod project {
        tonic::include_proto!("project.project.v1");
    }
}

pub use error::{ERROR_CODE_KEY, IntoStatus, error_code_from_status, status_with_code};
pub use project_client::ProjectClient;
pub use server::{GrpcServerBuilder, create_health_service, create_reflection_service};
pub use user_client::{ClientConfig, UserClient};

pub use tonic::{Code, Request, Response, Status};
