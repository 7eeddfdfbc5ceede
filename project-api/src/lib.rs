pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;

use project_common::auth::TokenKey;
use services::{ProjectRpc, UserRpc};
use std::sync::Arc;
use std::time::Duration;

pub use startup::{build_router, Application};

#[derive(Clone)]
pub struct AppState {
    pub user_rpc: Arc<dyn UserRpc>,
    pub project_rpc: Arc<dyn ProjectRpc>,
    /// Verifies access tokens minted by the user service.
    pub access_key: TokenKey,
    /// Deadline applied to every upstream call.
    pub rpc_timeout: Duration,
}

impl AppState {
    pub fn new(
        user_rpc: Arc<dyn UserRpc>,
        project_rpc: Arc<dyn ProjectRpc>,
        access_key: TokenKey,
        rpc_timeout: Duration,
    ) -> Self {
        Self {
            user_rpc,
            project_rpc,
            access_key,
            rpc_timeout,
        }
    }
}
