pub mod rpc;

pub use rpc::{call_rpc, ProjectRpc, UserRpc};
