use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use packtrack_core::{DomainError, DomainResult};

use crate::password::hash_password;

/// Stored user record. The username is the key of the surrounding
/// [`UserBook`]. Users are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub password_hash: String,
}

/// Whole-document user table, keyed by username.
pub type UserBook = BTreeMap<String, UserRecord>;

/// True only when the user exists and the digest matches. Callers must not
/// distinguish the two failure cases toward the client.
pub fn verify_login(users: &UserBook, username: &str, password: &str) -> bool {
    users
        .get(username)
        .is_some_and(|u| u.password_hash == hash_password(password))
}

pub fn add_user(users: &mut UserBook, username: &str, password: &str) -> DomainResult<()> {
    let username = username.trim();
    let password = password.trim();
    if username.is_empty() || password.is_empty() {
        return Err(DomainError::validation("username and password are required"));
    }
    if users.contains_key(username) {
        return Err(DomainError::conflict(format!(
            "user '{username}' already exists"
        )));
    }

    users.insert(
        username.to_string(),
        UserRecord {
            password_hash: hash_password(password),
        },
    );
    Ok(())
}

/// Overwrite the stored digest after re-checking the current password.
/// A missing user and a wrong current password fail the same way.
pub fn change_password(
    users: &mut UserBook,
    username: &str,
    current: &str,
    new: &str,
) -> DomainResult<()> {
    if current.is_empty() || new.is_empty() {
        return Err(DomainError::validation(
            "current and new passwords are required",
        ));
    }

    let user = users.get_mut(username).ok_or(DomainError::Forbidden)?;
    if user.password_hash != hash_password(current) {
        return Err(DomainError::Forbidden);
    }

    user.password_hash = hash_password(new);
    Ok(())
}
