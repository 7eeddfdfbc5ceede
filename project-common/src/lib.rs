//! project-common: shared infrastructure for the project-management services.
pub mod auth;
pub mod config;
pub mod error;
pub mod error_code;
pub mod grpc;
pub mod middleware;
pub mod observability;

pub use prost;
pub use tonic;
