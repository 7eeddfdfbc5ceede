pub mod password;
pub mod validation;

pub use password::{hash_password, Password, PasswordHashString};
pub use validation::{generate_code, is_valid_mobile};
