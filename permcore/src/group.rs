use serde::{Deserialize, Serialize};

/// Namespace used whenever the caller does not name an organization.
pub const DEFAULT_ORGANIZATION: &str = "default";

#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct Group {
    pub id: i64,
    pub organization: String,
    pub name: String,
    pub description: Option<String>,
    pub created_ts: i64,
}

mod impls;
