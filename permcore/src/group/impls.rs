use crate::{
    error::ValueError,
    principal::GroupRef,
};
use super::Group;

impl Group {
    /// Validates a name for a real group.  The virtual group's name is
    /// reserved in every letter case.
    pub fn validate_name(name: &str) -> Result<(), ValueError> {
        if name.trim().is_empty() {
            Err(ValueError::Unsupported(name.to_string()))
        } else if GroupRef::is_anyone_name(name) {
            Err(ValueError::ReservedGroupName(name.to_string()))
        } else {
            Ok(())
        }
    }

    pub fn group_ref(&self) -> GroupRef {
        GroupRef::Group(self.id)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn validate_name() {
        assert!(Group::validate_name("sonar-users").is_ok());
        assert!(matches!(
            Group::validate_name("ANYONE"),
            Err(ValueError::ReservedGroupName(s)) if s == "ANYONE",
        ));
        assert!(matches!(
            Group::validate_name(""),
            Err(ValueError::Unsupported(_)),
        ));
    }
}
