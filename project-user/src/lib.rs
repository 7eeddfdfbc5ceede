pub mod config;
pub mod grpc;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

pub use startup::Application;
