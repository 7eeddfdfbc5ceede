pub mod auth;
pub mod form;

pub use auth::{auth_middleware, CurrentMember, ORGANIZATION_CODE_HEADER};
pub use form::ValidForm;
