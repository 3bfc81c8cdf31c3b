//! Permission templates
//!
//! A template is a reusable bundle of role assignments that is applied
//! to a project when it gets provisioned.  The structs here hold a
//! complete snapshot of a template as loaded from a backend, such that
//! applying or simulating a template is a pure computation over the
//! snapshot.

use serde::{Deserialize, Serialize};
use std::collections::{
    BTreeMap,
    BTreeSet,
};
use crate::{
    principal::GroupRef,
    role::Role,
};

/// The role is to be granted to the group (or to anyone).
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct GroupEntry {
    pub group: GroupRef,
    pub role: Role,
}

/// The role is to be granted to the user.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct UserEntry {
    pub user_id: i64,
    pub role: Role,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct PermissionTemplate {
    pub id: i64,
    pub uuid: String,
    pub name: String,
    pub description: Option<String>,
    /// Regular expression matched against the full project key.
    pub key_pattern: Option<String>,
    pub created_ts: i64,
    pub updated_ts: i64,
    pub group_entries: BTreeSet<GroupEntry>,
    pub user_entries: BTreeSet<UserEntry>,
    /// role -> whether the project creator also receives the role.
    pub characteristics: BTreeMap<Role, bool>,
}

/// How a caller refers to a template.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum TemplateRef {
    Uuid(String),
    Name(String),
}

mod display;
mod impls;
