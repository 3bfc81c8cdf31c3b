use async_trait::async_trait;
use mockall::mock;
use permcore::{
    error::BackendError,
    grant::Grant,
    group::Group,
    platform::{
        DefaultPermPlatform,
        PlatformUrl,
    },
    principal::{
        GroupRef,
        Principal,
    },
    project::Project,
    role::Role,
    scope::Scope,
    template::PermissionTemplate,
    traits::{
        GrantBackend,
        GroupBackend,
        MembershipBackend,
        ProjectBackend,
        TemplateBackend,
        UserBackend,
    },
    user::User,
};

mock! {
    pub Platform {
        // Methods taking an `Option<&str>` are mocked with owned values
        // and forwarded by the manual trait impls below, as the lifetime
        // inside the option does not survive the mock expectations.
        pub async fn group_add(
            &self,
            organization: &str,
            name: &str,
            description: Option<String>,
        ) -> Result<i64, BackendError>;
        pub async fn group_get_by_id(
            &self,
            id: i64,
        ) -> Result<Option<Group>, BackendError>;
        pub async fn group_get_by_name(
            &self,
            organization: &str,
            name: &str,
        ) -> Result<Option<Group>, BackendError>;

        pub async fn template_add(
            &self,
            uuid: &str,
            name: &str,
            description: Option<String>,
            key_pattern: Option<String>,
        ) -> Result<i64, BackendError>;
        pub async fn template_get_by_uuid(
            &self,
            uuid: &str,
        ) -> Result<Option<PermissionTemplate>, BackendError>;
        pub async fn template_get_by_name(
            &self,
            name: &str,
        ) -> Result<Option<PermissionTemplate>, BackendError>;
        pub async fn template_list(
            &self,
        ) -> Result<Vec<PermissionTemplate>, BackendError>;
        pub async fn template_add_user(
            &self,
            template_id: i64,
            user_id: i64,
            role: &Role,
        ) -> Result<bool, BackendError>;
        pub async fn template_remove_user(
            &self,
            template_id: i64,
            user_id: i64,
            role: &Role,
        ) -> Result<bool, BackendError>;
        pub async fn template_add_group(
            &self,
            template_id: i64,
            group: &GroupRef,
            role: &Role,
        ) -> Result<bool, BackendError>;
        pub async fn template_remove_group(
            &self,
            template_id: i64,
            group: &GroupRef,
            role: &Role,
        ) -> Result<bool, BackendError>;
        pub async fn template_set_characteristic(
            &self,
            template_id: i64,
            role: &Role,
            with_project_creator: bool,
        ) -> Result<(), BackendError>;
    }

    impl PlatformUrl for Platform {
        fn url(&self) -> &str;
    }

    #[async_trait]
    impl UserBackend for Platform {
        async fn add_user(&self, login: &str, name: &str) -> Result<i64, BackendError>;
        async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, BackendError>;
        async fn get_user_by_login(&self, login: &str) -> Result<Option<User>, BackendError>;
    }

    #[async_trait]
    impl MembershipBackend for Platform {
        async fn add_user_to_group(&self, user_id: i64, group_id: i64) -> Result<bool, BackendError>;
        async fn remove_user_from_group(&self, user_id: i64, group_id: i64) -> Result<bool, BackendError>;
        async fn get_groups_for_user(&self, user_id: i64) -> Result<Vec<Group>, BackendError>;
    }

    #[async_trait]
    impl ProjectBackend for Platform {
        async fn add_project(
            &self, key: &str, qualifier: &str, name: &str
        ) -> Result<i64, BackendError>;
        async fn get_project_by_id(&self, id: i64) -> Result<Option<Project>, BackendError>;
        async fn get_project_by_key(&self, key: &str) -> Result<Option<Project>, BackendError>;
    }

    #[async_trait]
    impl GrantBackend for Platform {
        async fn insert_grant(&self, grant: &Grant) -> Result<bool, BackendError>;
        async fn delete_grant(&self, grant: &Grant) -> Result<bool, BackendError>;
        async fn insert_grants_for_project(
            &self,
            project_id: i64,
            grants: &[Grant],
        ) -> Result<(), BackendError>;
        async fn get_roles_for_principal(
            &self,
            principal: &Principal,
            scope: &Scope,
        ) -> Result<Vec<Role>, BackendError>;
        async fn get_grants_for_project(&self, project_id: i64) -> Result<Vec<Grant>, BackendError>;
        async fn count_grants_for_project(&self, project_id: i64) -> Result<i64, BackendError>;
    }
}

#[async_trait]
impl GroupBackend for MockPlatform {
    async fn add_group(
        &self,
        organization: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<i64, BackendError> {
        self.group_add(organization, name, description.map(str::to_string)).await
    }

    async fn get_group_by_id(
        &self,
        id: i64,
    ) -> Result<Option<Group>, BackendError> {
        self.group_get_by_id(id).await
    }

    async fn get_group_by_name(
        &self,
        organization: &str,
        name: &str,
    ) -> Result<Option<Group>, BackendError> {
        self.group_get_by_name(organization, name).await
    }
}

#[async_trait]
impl TemplateBackend for MockPlatform {
    async fn add_template(
        &self,
        uuid: &str,
        name: &str,
        description: Option<&str>,
        key_pattern: Option<&str>,
    ) -> Result<i64, BackendError> {
        self.template_add(
            uuid,
            name,
            description.map(str::to_string),
            key_pattern.map(str::to_string),
        ).await
    }

    async fn get_template_by_uuid(
        &self,
        uuid: &str,
    ) -> Result<Option<PermissionTemplate>, BackendError> {
        self.template_get_by_uuid(uuid).await
    }

    async fn get_template_by_name(
        &self,
        name: &str,
    ) -> Result<Option<PermissionTemplate>, BackendError> {
        self.template_get_by_name(name).await
    }

    async fn list_templates(
        &self,
    ) -> Result<Vec<PermissionTemplate>, BackendError> {
        self.template_list().await
    }

    async fn add_user_to_template(
        &self,
        template_id: i64,
        user_id: i64,
        role: &Role,
    ) -> Result<bool, BackendError> {
        self.template_add_user(template_id, user_id, role).await
    }

    async fn remove_user_from_template(
        &self,
        template_id: i64,
        user_id: i64,
        role: &Role,
    ) -> Result<bool, BackendError> {
        self.template_remove_user(template_id, user_id, role).await
    }

    async fn add_group_to_template(
        &self,
        template_id: i64,
        group: &GroupRef,
        role: &Role,
    ) -> Result<bool, BackendError> {
        self.template_add_group(template_id, group, role).await
    }

    async fn remove_group_from_template(
        &self,
        template_id: i64,
        group: &GroupRef,
        role: &Role,
    ) -> Result<bool, BackendError> {
        self.template_remove_group(template_id, group, role).await
    }

    async fn set_template_characteristic(
        &self,
        template_id: i64,
        role: &Role,
        with_project_creator: bool,
    ) -> Result<(), BackendError> {
        self.template_set_characteristic(template_id, role, with_project_creator).await
    }
}

impl DefaultPermPlatform for MockPlatform {}

#[cfg(test)]
mod tests {
    use permcore::platform::PermPlatform;
    use super::*;

    #[async_std::test]
    async fn forwards_optional_arguments() -> anyhow::Result<()> {
        let mut platform = MockPlatform::new();
        platform.expect_group_add()
            .times(1)
            .withf(|org, name, description| {
                org == "default" && name == "devs" && description.as_deref() == Some("Developers")
            })
            .returning(|_, _, _| Ok(3));
        platform.expect_template_add()
            .times(1)
            .withf(|uuid, name, description, key_pattern| {
                uuid == "tpl" &&
                name == "Template" &&
                description.is_none() &&
                key_pattern.as_deref() == Some("a.*")
            })
            .returning(|_, _, _, _| Ok(1));
        platform.expect_url()
            .return_const("mock://".to_string());

        let platform: &dyn PermPlatform = platform.as_dyn();
        assert_eq!(platform.add_group("default", "devs", Some("Developers")).await?, 3);
        assert_eq!(platform.add_template("tpl", "Template", None, Some("a.*")).await?, 1);
        assert_eq!(platform.url(), "mock://");
        Ok(())
    }
}
