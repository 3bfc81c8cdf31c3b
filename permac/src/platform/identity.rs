use permcore::{
    group::Group,
    principal::GroupRef,
    project::Project,
    traits::{
        GroupBackend,
        MembershipBackend,
        ProjectBackend,
        UserBackend,
    },
    user::User,
};

use crate::{
    error::{
        Error,
        NotFound,
    },
    platform::Platform,
};

// User management.
impl Platform {
    pub async fn create_user(
        &self,
        login: &str,
        name: &str,
    ) -> Result<User, Error> {
        let id = self.platform.add_user(login, name).await?;
        log::info!("created user {login:?} with id {id}");
        self.get_user(id).await
    }

    pub async fn get_user(
        &self,
        id: i64,
    ) -> Result<User, Error> {
        self.platform.get_user_by_id(id).await?
            .ok_or_else(|| NotFound::User(id.to_string()).into())
    }

    pub async fn get_user_by_login(
        &self,
        login: &str,
    ) -> Result<User, Error> {
        self.platform.get_user_by_login(login).await?
            .ok_or_else(|| NotFound::User(login.to_string()).into())
    }
}

// Group management.
impl Platform {
    pub async fn create_group(
        &self,
        organization: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Group, Error> {
        Group::validate_name(name)?;
        let id = self.platform.add_group(organization, name, description).await?;
        log::info!("created group {name:?} in organization {organization:?} with id {id}");
        self.platform.get_group_by_id(id).await?
            .ok_or_else(|| NotFound::Group(name.to_string()).into())
    }

    /// Looks up a real group by name within the platform's organization.
    pub async fn get_group_by_name(
        &self,
        name: &str,
    ) -> Result<Group, Error> {
        self.platform.get_group_by_name(&self.organization, name).await?
            .ok_or_else(|| NotFound::Group(name.to_string()).into())
    }

    /// Resolves an externally supplied group name.  The name of the
    /// virtual group is accepted in any letter case.
    pub async fn resolve_group(
        &self,
        name: &str,
    ) -> Result<GroupRef, Error> {
        if GroupRef::is_anyone_name(name) {
            Ok(GroupRef::Anyone)
        } else {
            Ok(self.get_group_by_name(name).await?.group_ref())
        }
    }

    pub async fn add_user_to_group(
        &self,
        login: &str,
        group: &str,
    ) -> Result<bool, Error> {
        let user = self.get_user_by_login(login).await?;
        let group = self.get_group_by_name(group).await?;
        Ok(self.platform.add_user_to_group(user.id, group.id).await?)
    }

    pub async fn remove_user_from_group(
        &self,
        login: &str,
        group: &str,
    ) -> Result<bool, Error> {
        let user = self.get_user_by_login(login).await?;
        let group = self.get_group_by_name(group).await?;
        Ok(self.platform.remove_user_from_group(user.id, group.id).await?)
    }

    pub async fn groups_of_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<Group>, Error> {
        Ok(self.platform.get_groups_for_user(user_id).await?)
    }
}

// Project management.
impl Platform {
    pub async fn create_project(
        &self,
        key: &str,
        qualifier: &str,
        name: &str,
    ) -> Result<Project, Error> {
        let id = self.platform.add_project(key, qualifier, name).await?;
        log::info!("created project {key:?} ({qualifier}) with id {id}");
        self.get_project(id).await
    }

    pub async fn get_project(
        &self,
        id: i64,
    ) -> Result<Project, Error> {
        self.platform.get_project_by_id(id).await?
            .ok_or_else(|| NotFound::Project(id.to_string()).into())
    }

    pub async fn get_project_by_key(
        &self,
        key: &str,
    ) -> Result<Project, Error> {
        self.platform.get_project_by_key(key).await?
            .ok_or_else(|| NotFound::Project(key.to_string()).into())
    }
}
