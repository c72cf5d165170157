//! Authentication: user records, password digests, and sessions.
//!
//! Single-role model: any known user may do anything. Credential checks are
//! deterministic domain logic; the session map is the one piece of in-process
//! mutable state the service carries.

pub mod password;
pub mod session;
pub mod user;

pub use password::hash_password;
pub use session::SessionManager;
pub use user::{UserBook, UserRecord, add_user, change_password, verify_login};
