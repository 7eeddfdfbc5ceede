pub mod page;
pub mod project;
pub mod result;
pub mod user;

pub use page::Page;
pub use result::{ApiError, ApiResult, SUCCESS_CODE};
