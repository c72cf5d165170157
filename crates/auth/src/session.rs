use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

/// In-memory session table: opaque token → username.
///
/// Process-local; sessions do not survive a restart. There is no global
/// "current user": the HTTP layer resolves a token per request and passes an
/// explicit context into handlers.
#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: Mutex<HashMap<String, String>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session for a username and return its token.
    pub fn open(&self, username: &str) -> String {
        let token = Uuid::now_v7().to_string();
        self.sessions
            .lock()
            .unwrap()
            .insert(token.clone(), username.to_string());
        token
    }

    /// Username for a live token, if any.
    pub fn resolve(&self, token: &str) -> Option<String> {
        self.sessions.lock().unwrap().get(token).cloned()
    }

    /// Close a session. Returns whether the token was live.
    pub fn close(&self, token: &str) -> bool {
        self.sessions.lock().unwrap().remove(token).is_some()
    }
}
