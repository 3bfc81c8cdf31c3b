use serde::{Deserialize, Serialize};
use crate::{
    principal::Principal,
    role::Role,
    scope::Scope,
};

/// A stored fact that the principal holds the role on the scope.
///
/// Grants have set semantics in every backend: persisting a triple that
/// already exists must not produce a second record.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct Grant {
    pub principal: Principal,
    pub role: Role,
    pub scope: Scope,
}

impl Grant {
    pub fn new(
        principal: impl Into<Principal>,
        role: impl Into<Role>,
        scope: Scope,
    ) -> Self {
        Self {
            principal: principal.into(),
            role: role.into(),
            scope,
        }
    }
}

impl std::fmt::Display for Grant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.principal, self.role, self.scope)
    }
}
