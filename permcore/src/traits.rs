use async_trait::async_trait;
use crate::{
    error::BackendError,
    grant::Grant,
    group::Group,
    principal::{
        GroupRef,
        Principal,
    },
    project::Project,
    role::Role,
    scope::Scope,
    template::PermissionTemplate,
    user::User,
};

#[async_trait]
pub trait UserBackend {
    async fn add_user(
        &self,
        login: &str,
        name: &str,
    ) -> Result<i64, BackendError>;
    async fn get_user_by_id(
        &self,
        id: i64,
    ) -> Result<Option<User>, BackendError>;
    async fn get_user_by_login(
        &self,
        login: &str,
    ) -> Result<Option<User>, BackendError>;
}

#[async_trait]
pub trait GroupBackend {
    async fn add_group(
        &self,
        organization: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<i64, BackendError>;
    async fn get_group_by_id(
        &self,
        id: i64,
    ) -> Result<Option<Group>, BackendError>;
    async fn get_group_by_name(
        &self,
        organization: &str,
        name: &str,
    ) -> Result<Option<Group>, BackendError>;
}

/// Read side of this trait (`get_groups_for_user`) is the membership
/// resolver consumed by the simulator.
#[async_trait]
pub trait MembershipBackend {
    async fn add_user_to_group(
        &self,
        user_id: i64,
        group_id: i64,
    ) -> Result<bool, BackendError>;
    async fn remove_user_from_group(
        &self,
        user_id: i64,
        group_id: i64,
    ) -> Result<bool, BackendError>;
    async fn get_groups_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<Group>, BackendError>;
}

#[async_trait]
pub trait ProjectBackend {
    async fn add_project(
        &self,
        key: &str,
        qualifier: &str,
        name: &str,
    ) -> Result<i64, BackendError>;
    async fn get_project_by_id(
        &self,
        id: i64,
    ) -> Result<Option<Project>, BackendError>;
    async fn get_project_by_key(
        &self,
        key: &str,
    ) -> Result<Option<Project>, BackendError>;
}

#[async_trait]
pub trait GrantBackend {
    /// Persist a single grant; returns `false` if it was already present.
    /// A project scoped grant refreshes the project's authorization
    /// timestamp as part of the same transaction.
    async fn insert_grant(
        &self,
        grant: &Grant,
    ) -> Result<bool, BackendError>;
    /// Remove a single grant; returns `false` if there was nothing to
    /// remove.  Refreshes the timestamp like `insert_grant`.
    async fn delete_grant(
        &self,
        grant: &Grant,
    ) -> Result<bool, BackendError>;
    /// Persist every grant for the project along with the refresh of the
    /// authorization timestamp as a single unit of work; on failure
    /// nothing from the batch may remain.  Grants already present are
    /// skipped.  All grants must be scoped to the given project.
    async fn insert_grants_for_project(
        &self,
        project_id: i64,
        grants: &[Grant],
    ) -> Result<(), BackendError>;
    /// Roles held directly by the principal on exactly the scope.
    async fn get_roles_for_principal(
        &self,
        principal: &Principal,
        scope: &Scope,
    ) -> Result<Vec<Role>, BackendError>;
    async fn get_grants_for_project(
        &self,
        project_id: i64,
    ) -> Result<Vec<Grant>, BackendError>;
    async fn count_grants_for_project(
        &self,
        project_id: i64,
    ) -> Result<i64, BackendError>;
}

/// The template repository.  Implementations must load a template and
/// all of its entries as one consistent snapshot.
#[async_trait]
pub trait TemplateBackend {
    async fn add_template(
        &self,
        uuid: &str,
        name: &str,
        description: Option<&str>,
        key_pattern: Option<&str>,
    ) -> Result<i64, BackendError>;
    async fn get_template_by_uuid(
        &self,
        uuid: &str,
    ) -> Result<Option<PermissionTemplate>, BackendError>;
    async fn get_template_by_name(
        &self,
        name: &str,
    ) -> Result<Option<PermissionTemplate>, BackendError>;
    async fn list_templates(
        &self,
    ) -> Result<Vec<PermissionTemplate>, BackendError>;
    async fn add_user_to_template(
        &self,
        template_id: i64,
        user_id: i64,
        role: &Role,
    ) -> Result<bool, BackendError>;
    async fn remove_user_from_template(
        &self,
        template_id: i64,
        user_id: i64,
        role: &Role,
    ) -> Result<bool, BackendError>;
    async fn add_group_to_template(
        &self,
        template_id: i64,
        group: &GroupRef,
        role: &Role,
    ) -> Result<bool, BackendError>;
    async fn remove_group_from_template(
        &self,
        template_id: i64,
        group: &GroupRef,
        role: &Role,
    ) -> Result<bool, BackendError>;
    async fn set_template_characteristic(
        &self,
        template_id: i64,
        role: &Role,
        with_project_creator: bool,
    ) -> Result<(), BackendError>;
}
