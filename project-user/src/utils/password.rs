use sha2::{Digest, Sha256};

/// Newtype for a plaintext password; `Debug` never prints the value.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    pub fn new(password: String) -> Self {
        Self(password)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Newtype for password hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHashString(String);

impl PasswordHashString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Hash a password as lowercase hex SHA-256.
///
/// The digest is unsalted so that login can look members up by
/// `(account, hash)` directly.
pub fn hash_password(password: &Password) -> PasswordHashString {
    let digest = Sha256::digest(password.as_str().as_bytes());
    PasswordHashString(hex::encode(digest))
}
