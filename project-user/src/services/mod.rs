//! Services layer for project-user.
//!
//! Business logic for verification codes, registration and login, plus the
//! cache and store it runs on.

pub mod cache;
pub mod error;
pub mod login;
pub mod notifier;
pub mod store;

pub use cache::{registration_key, CacheError, CodeCache, MemoryCache, RedisCache};
pub use error::ServiceError;
pub use login::{LoginOutput, LoginService, LoginSettings, RegisterInput, TOKEN_TYPE};
pub use notifier::{CodeNotifier, LogNotifier, MockNotifier};
pub use store::{MemoryStore, PostgresStore, Store, StoreError};
