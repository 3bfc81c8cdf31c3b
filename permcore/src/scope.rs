use serde::{Deserialize, Serialize};

/// Where a grant applies.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
pub enum Scope {
    #[default]
    Global,
    Project(i64),
}

impl Scope {
    pub fn project_id(&self) -> Option<i64> {
        match self {
            Scope::Global => None,
            Scope::Project(id) => Some(*id),
        }
    }
}

impl From<Option<i64>> for Scope {
    fn from(project_id: Option<i64>) -> Self {
        project_id.map(Scope::Project)
            .unwrap_or(Scope::Global)
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Global => f.write_str("<Global>"),
            Scope::Project(id) => write!(f, "<Project:{id}>"),
        }
    }
}
