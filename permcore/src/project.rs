use serde::{Deserialize, Serialize};

pub mod qualifier {
    pub const PROJECT: &str = "TRK";
    pub const VIEW: &str = "VW";
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct Project {
    pub id: i64,
    pub key: String,
    pub qualifier: String,
    pub name: String,
    pub created_ts: i64,
    /// Refreshed whenever the grants on this project change; caches of
    /// computed authorizations are keyed off of this value.
    pub authorization_updated_ts: Option<i64>,
}
