use serde::{Deserialize, Serialize};

/// An authorization role key.
///
/// Roles are opaque to the engine: no hierarchy or meaning is attached
/// to any of them, they are only ever compared for equality.  The keys
/// commonly used by the platform are listed under [`key`].
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Role(String);

pub mod key {
    pub const ADMIN: &str = "admin";
    pub const USER: &str = "user";
    pub const CODEVIEWER: &str = "codeviewer";
    pub const ISSUE_ADMIN: &str = "issueadmin";
    pub const SCAN: &str = "scan";
    pub const PROVISIONING: &str = "provisioning";
}

mod impls;
