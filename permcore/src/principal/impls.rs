use super::{
    ANYONE,
    GroupRef,
    Principal,
};

impl GroupRef {
    /// Whether the externally supplied group name refers to the virtual
    /// group.  The comparison ignores case, so "anyone" and "AnYoNe"
    /// both match.
    pub fn is_anyone_name(name: &str) -> bool {
        name.eq_ignore_ascii_case(ANYONE)
    }

    pub fn group_id(&self) -> Option<i64> {
        match self {
            GroupRef::Group(id) => Some(*id),
            GroupRef::Anyone => None,
        }
    }
}

impl From<GroupRef> for Principal {
    fn from(group: GroupRef) -> Self {
        match group {
            GroupRef::Group(id) => Principal::Group(id),
            GroupRef::Anyone => Principal::Anyone,
        }
    }
}

impl Principal {
    pub fn user_id(&self) -> Option<i64> {
        match self {
            Principal::User(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns the group side of this principal, `None` for users.
    pub fn group_ref(&self) -> Option<GroupRef> {
        match self {
            Principal::User(_) => None,
            Principal::Group(id) => Some(GroupRef::Group(*id)),
            Principal::Anyone => Some(GroupRef::Anyone),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn anyone_name() {
        assert!(GroupRef::is_anyone_name("Anyone"));
        assert!(GroupRef::is_anyone_name("anyone"));
        assert!(GroupRef::is_anyone_name("AnYoNe"));
        assert!(!GroupRef::is_anyone_name("anyone2"));
        assert!(!GroupRef::is_anyone_name("sonar-users"));
    }

    #[test]
    fn conversion() {
        assert_eq!(Principal::from(GroupRef::Anyone), Principal::Anyone);
        assert_eq!(Principal::from(GroupRef::Group(3)), Principal::Group(3));
        assert_eq!(Principal::Group(3).group_ref(), Some(GroupRef::Group(3)));
        assert_eq!(Principal::User(3).group_ref(), None);
        assert_eq!(Principal::User(3).user_id(), Some(3));
        assert_eq!(GroupRef::Anyone.group_id(), None);
    }

    #[test]
    fn serde() -> anyhow::Result<()> {
        assert_eq!(serde_json::to_string(&GroupRef::Anyone)?, r#""Anyone""#);
        assert_eq!(serde_json::to_string(&Principal::Group(3))?, r#"{"Group":3}"#);
        let principal: Principal = serde_json::from_str(r#"{"User":2}"#)?;
        assert_eq!(principal, Principal::User(2));
        Ok(())
    }
}
