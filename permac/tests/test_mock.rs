use permac::{
    error::Error,
    platform::Builder,
    Settings,
};
use permcore::{
    agent::Agent,
    error::BackendError,
    principal::GroupRef,
    project::qualifier,
    role::key,
    template::{
        GroupEntry,
        PermissionTemplate,
    },
    user::User,
};
use test_perm::core::MockPlatform;

fn template() -> PermissionTemplate {
    let mut template = PermissionTemplate {
        id: 1,
        uuid: "tpl".to_string(),
        name: "Template".to_string(),
        .. Default::default()
    };
    template.group_entries.insert(GroupEntry::new(GroupRef::Group(7), key::CODEVIEWER));
    template.group_entries.insert(GroupEntry::new(GroupRef::Anyone, key::USER));
    template
}

fn user() -> User {
    User {
        id: 3,
        login: "u".to_string(),
        name: "U".to_string(),
        created_ts: 1234567890,
    }
}

#[async_std::test]
async fn membership_failure_propagates() -> anyhow::Result<()> {
    let mut platform = MockPlatform::new();
    platform.expect_template_get_by_uuid()
        .times(1)
        .withf(|uuid| uuid == "tpl")
        .returning(|_| Ok(Some(template())));
    platform.expect_get_groups_for_user()
        .times(1)
        .withf(|user_id| *user_id == 3)
        .returning(|_| Err(BackendError::Unknown));
    let platform = Builder::new()
        .platform(platform)
        .settings(Settings::with_default_template("tpl"))
        .build();

    // even a role granted to anyone is not reported when membership
    // cannot be determined
    assert!(matches!(
        platform.would_have_permission(&Agent::from(user()), key::USER, "k", qualifier::PROJECT).await,
        Err(Error::Backend(BackendError::Unknown)),
    ));
    Ok(())
}

#[async_std::test]
async fn anonymous_skips_membership() -> anyhow::Result<()> {
    let mut platform = MockPlatform::new();
    platform.expect_template_get_by_uuid()
        .times(2)
        .returning(|_| Ok(Some(template())));
    platform.expect_get_groups_for_user()
        .never();
    let platform = Builder::new()
        .platform(platform)
        .settings(Settings::with_default_template("tpl"))
        .build();

    assert!(platform.would_have_permission(&Agent::Anonymous, key::USER, "k", qualifier::PROJECT).await?);
    assert!(!platform.would_have_permission(&Agent::Anonymous, key::CODEVIEWER, "k", qualifier::PROJECT).await?);
    Ok(())
}

#[async_std::test]
async fn template_failure_propagates() -> anyhow::Result<()> {
    let mut platform = MockPlatform::new();
    platform.expect_template_get_by_uuid()
        .times(1)
        .returning(|_| Err(BackendError::AppInvariantViolation("unavailable".to_string())));
    let platform = Builder::new()
        .platform(platform)
        .settings(Settings::with_default_template("tpl"))
        .build();

    assert!(matches!(
        platform.would_have_permission(&Agent::Anonymous, key::USER, "k", qualifier::PROJECT).await,
        Err(Error::Backend(BackendError::AppInvariantViolation(_))),
    ));
    Ok(())
}
