use permcore::{
    grant::Grant,
    principal::Principal,
    role::Role,
    scope::Scope,
    traits::GrantBackend,
};

use crate::{
    error::Error,
    platform::Platform,
};

impl Platform {
    // Ensures the project a scope refers to exists.
    async fn check_scope(&self, scope: &Scope) -> Result<(), Error> {
        if let Scope::Project(id) = scope {
            self.get_project(*id).await?;
        }
        Ok(())
    }

    pub async fn grant_user_role(
        &self,
        user_id: i64,
        role: impl Into<Role>,
        scope: Scope,
    ) -> Result<bool, Error> {
        self.get_user(user_id).await?;
        self.check_scope(&scope).await?;
        let grant = Grant::new(Principal::User(user_id), role, scope);
        let result = self.platform.insert_grant(&grant).await?;
        log::trace!("grant {grant}: inserted={result}");
        Ok(result)
    }

    pub async fn revoke_user_role(
        &self,
        user_id: i64,
        role: impl Into<Role>,
        scope: Scope,
    ) -> Result<bool, Error> {
        self.check_scope(&scope).await?;
        let grant = Grant::new(Principal::User(user_id), role, scope);
        let result = self.platform.delete_grant(&grant).await?;
        log::trace!("revoke {grant}: deleted={result}");
        Ok(result)
    }

    /// Grants the role to the named group, or to anyone.
    pub async fn grant_group_role(
        &self,
        group: &str,
        role: impl Into<Role>,
        scope: Scope,
    ) -> Result<bool, Error> {
        let group = self.resolve_group(group).await?;
        self.check_scope(&scope).await?;
        let grant = Grant::new(group, role, scope);
        let result = self.platform.insert_grant(&grant).await?;
        log::trace!("grant {grant}: inserted={result}");
        Ok(result)
    }

    pub async fn revoke_group_role(
        &self,
        group: &str,
        role: impl Into<Role>,
        scope: Scope,
    ) -> Result<bool, Error> {
        let group = self.resolve_group(group).await?;
        self.check_scope(&scope).await?;
        let grant = Grant::new(group, role, scope);
        let result = self.platform.delete_grant(&grant).await?;
        log::trace!("revoke {grant}: deleted={result}");
        Ok(result)
    }

    /// Roles held by the group on exactly the scope.
    pub async fn group_roles(
        &self,
        group: &str,
        scope: Scope,
    ) -> Result<Vec<Role>, Error> {
        let principal = Principal::from(self.resolve_group(group).await?);
        Ok(self.platform.get_roles_for_principal(&principal, &scope).await?)
    }

    /// Roles held directly by the user on exactly the scope; roles
    /// obtained through groups are not included.
    pub async fn user_roles(
        &self,
        login: &str,
        scope: Scope,
    ) -> Result<Vec<Role>, Error> {
        let user = self.get_user_by_login(login).await?;
        Ok(self.platform.get_roles_for_principal(&Principal::User(user.id), &scope).await?)
    }

    pub async fn project_grants(
        &self,
        project_id: i64,
    ) -> Result<Vec<Grant>, Error> {
        Ok(self.platform.get_grants_for_project(project_id).await?)
    }

    pub async fn count_project_grants(
        &self,
        project_id: i64,
    ) -> Result<i64, Error> {
        Ok(self.platform.count_grants_for_project(project_id).await?)
    }
}
