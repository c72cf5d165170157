/// Authenticated identity for a request.
///
/// Injected by the session middleware; handlers never consult global session
/// state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    username: String,
}

impl AuthContext {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}
