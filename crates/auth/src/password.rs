use sha2::{Digest, Sha256};

/// One-way digest of a password: lowercase hex SHA-256.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}
