//! gRPC service implementations for project-user.

pub mod login_service;

// Include the generated proto code
pub mod proto {
    pub mod user {
        tonic::include_proto!("project.user.v1");

        // File descriptor set for gRPC reflection
        pub const FILE_DESCRIPTOR_SET: &[u8] =
            tonic::include_file_descriptor_set!("user_service_descriptor");
    }
}

pub use login_service::LoginServiceImpl;
