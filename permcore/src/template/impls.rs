use std::collections::BTreeSet;
use crate::{
    agent::Agent,
    grant::Grant,
    principal::{
        GroupRef,
        Principal,
    },
    role::Role,
    scope::Scope,
};
use super::{
    GroupEntry,
    PermissionTemplate,
    TemplateRef,
    UserEntry,
};

impl GroupEntry {
    pub fn new(group: GroupRef, role: impl Into<Role>) -> Self {
        Self { group, role: role.into() }
    }
}

impl UserEntry {
    pub fn new(user_id: i64, role: impl Into<Role>) -> Self {
        Self { user_id, role: role.into() }
    }
}

impl TemplateRef {
    pub fn uuid(uuid: impl Into<String>) -> Self {
        Self::Uuid(uuid.into())
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }
}

impl PermissionTemplate {
    /// Roles flagged to be granted to whoever creates the project.
    pub fn creator_roles(&self) -> impl Iterator<Item = &Role> {
        self.characteristics
            .iter()
            .filter_map(|(role, with_creator)| with_creator.then_some(role))
    }

    /// The complete set of grants this template produces on the project.
    /// Creator roles are only included when a creator is supplied.
    pub fn grants_for_project(
        &self,
        project_id: i64,
        creator_id: Option<i64>,
    ) -> BTreeSet<Grant> {
        let scope = Scope::Project(project_id);
        let groups = self.group_entries
            .iter()
            .map(|GroupEntry { group, role }| Grant::new(*group, role.clone(), scope));
        let users = self.user_entries
            .iter()
            .map(|UserEntry { user_id, role }| Grant::new(Principal::User(*user_id), role.clone(), scope));
        let creator = creator_id
            .into_iter()
            .flat_map(|id| self.creator_roles()
                .map(move |role| Grant::new(Principal::User(id), role.clone(), scope))
            );
        groups.chain(users).chain(creator).collect()
    }

    /// Whether applying this template to a new project would leave the
    /// agent holding the role, given the ids of the groups the agent
    /// belongs to.  A present agent is treated as the project creator.
    pub fn would_grant(
        &self,
        agent: &Agent,
        role: &str,
        group_ids: &BTreeSet<i64>,
    ) -> bool {
        let anyone = self.group_entries
            .iter()
            .any(|entry| entry.group == GroupRef::Anyone && entry.role == role);
        if anyone {
            return true;
        }
        let Some(user_id) = agent.user_id() else {
            return false;
        };
        self.user_entries
            .iter()
            .any(|entry| entry.user_id == user_id && entry.role == role)
        || self.group_entries
            .iter()
            .any(|entry| entry.role == role && match entry.group {
                GroupRef::Group(id) => group_ids.contains(&id),
                GroupRef::Anyone => false,
            })
        || self.characteristics
            .get(role)
            .copied()
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod test {
    use std::collections::BTreeSet;
    use crate::{
        agent::Agent,
        grant::Grant,
        principal::{
            GroupRef,
            Principal,
        },
        role::key,
        scope::Scope,
        user::User,
    };
    use super::*;

    fn user(id: i64, login: &str) -> User {
        User {
            id,
            login: login.to_string(),
            name: login.to_string(),
            created_ts: 1234567890,
        }
    }

    fn template() -> PermissionTemplate {
        let mut template = PermissionTemplate {
            id: 1,
            uuid: "default_20130101_010203".to_string(),
            name: "default".to_string(),
            .. Default::default()
        };
        template.user_entries.insert(UserEntry::new(1, key::USER));
        template.group_entries.insert(GroupEntry::new(GroupRef::Group(10), key::CODEVIEWER));
        template.group_entries.insert(GroupEntry::new(GroupRef::Anyone, key::ISSUE_ADMIN));
        template.characteristics.insert(key::SCAN.into(), true);
        template.characteristics.insert(key::ADMIN.into(), false);
        template
    }

    #[test]
    fn entries_are_sets() {
        let mut template = template();
        assert!(!template.user_entries.insert(UserEntry::new(1, key::USER)));
        assert!(!template.group_entries.insert(GroupEntry::new(GroupRef::Anyone, key::ISSUE_ADMIN)));
        assert_eq!(template.user_entries.len(), 1);
        assert_eq!(template.group_entries.len(), 2);
    }

    #[test]
    fn grants_without_creator() {
        let template = template();
        let scope = Scope::Project(5);
        assert_eq!(template.grants_for_project(5, None), BTreeSet::from([
            Grant::new(Principal::User(1), key::USER, scope),
            Grant::new(GroupRef::Group(10), key::CODEVIEWER, scope),
            Grant::new(GroupRef::Anyone, key::ISSUE_ADMIN, scope),
        ]));
    }

    #[test]
    fn grants_with_creator() {
        let template = template();
        let scope = Scope::Project(5);
        let grants = template.grants_for_project(5, Some(2));
        assert_eq!(grants.len(), 4);
        assert!(grants.contains(&Grant::new(Principal::User(2), key::SCAN, scope)));
        // characteristic flagged false never produces a grant
        assert!(!grants.contains(&Grant::new(Principal::User(2), key::ADMIN, scope)));

        // creator already listed as a user entry keeps both roles, once each
        let grants = template.grants_for_project(5, Some(1));
        assert_eq!(grants.len(), 4);
        assert!(grants.contains(&Grant::new(Principal::User(1), key::USER, scope)));
        assert!(grants.contains(&Grant::new(Principal::User(1), key::SCAN, scope)));
    }

    #[test]
    fn would_grant() {
        let template = template();
        let member = BTreeSet::from([10]);
        let agent = Agent::from(user(1, "u"));
        assert!(!template.would_grant(&agent, key::ADMIN, &member));
        assert!(template.would_grant(&agent, key::SCAN, &member));
        assert!(template.would_grant(&agent, key::USER, &member));
        assert!(template.would_grant(&agent, key::CODEVIEWER, &member));
        assert!(template.would_grant(&agent, key::ISSUE_ADMIN, &member));
        // not a member of the group
        assert!(!template.would_grant(&agent, key::CODEVIEWER, &BTreeSet::new()));

        let anonymous = Agent::Anonymous;
        assert!(!template.would_grant(&anonymous, key::ADMIN, &BTreeSet::new()));
        assert!(!template.would_grant(&anonymous, key::SCAN, &BTreeSet::new()));
        assert!(!template.would_grant(&anonymous, key::USER, &BTreeSet::new()));
        assert!(!template.would_grant(&anonymous, key::CODEVIEWER, &BTreeSet::new()));
        assert!(template.would_grant(&anonymous, key::ISSUE_ADMIN, &BTreeSet::new()));
    }

    #[test]
    fn empty_template() {
        let template = PermissionTemplate::default();
        let agent = Agent::from(user(1, "u"));
        assert!(template.grants_for_project(1, Some(1)).is_empty());
        assert!(!template.would_grant(&agent, key::ADMIN, &BTreeSet::new()));
        assert!(!template.would_grant(&Agent::Anonymous, key::ADMIN, &BTreeSet::new()));
    }
}
