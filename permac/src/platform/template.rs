use permcore::{
    role::Role,
    template::{
        PermissionTemplate,
        TemplateRef,
    },
    traits::TemplateBackend,
};

use crate::{
    error::{
        Error,
        NotFound,
    },
    platform::{
        Platform,
        resolve::key_pattern,
    },
};

impl Platform {
    pub async fn create_template(
        &self,
        uuid: &str,
        name: &str,
        description: Option<&str>,
        pattern: Option<&str>,
    ) -> Result<PermissionTemplate, Error> {
        if let Some(pattern) = pattern {
            key_pattern(pattern)?;
        }
        let id = self.platform.add_template(uuid, name, description, pattern).await?;
        log::info!("created template {name:?} ({uuid}) with id {id}");
        self.get_template(&TemplateRef::uuid(uuid)).await
    }

    pub async fn get_template(
        &self,
        template: &TemplateRef,
    ) -> Result<PermissionTemplate, Error> {
        let result = match template {
            TemplateRef::Uuid(uuid) => self.platform.get_template_by_uuid(uuid).await?,
            TemplateRef::Name(name) => self.platform.get_template_by_name(name).await?,
        };
        result.ok_or_else(|| NotFound::Template(template.to_string()).into())
    }

    pub async fn list_templates(
        &self,
    ) -> Result<Vec<PermissionTemplate>, Error> {
        Ok(self.platform.list_templates().await?)
    }

    pub async fn add_user_to_template(
        &self,
        template: &TemplateRef,
        login: &str,
        role: impl Into<Role>,
    ) -> Result<bool, Error> {
        let template = self.get_template(template).await?;
        let user = self.get_user_by_login(login).await?;
        Ok(self.platform.add_user_to_template(template.id, user.id, &role.into()).await?)
    }

    pub async fn remove_user_from_template(
        &self,
        template: &TemplateRef,
        login: &str,
        role: impl Into<Role>,
    ) -> Result<bool, Error> {
        let template = self.get_template(template).await?;
        let user = self.get_user_by_login(login).await?;
        Ok(self.platform.remove_user_from_template(template.id, user.id, &role.into()).await?)
    }

    /// Adds an entry for the named group, or for anyone.
    pub async fn add_group_to_template(
        &self,
        template: &TemplateRef,
        group: &str,
        role: impl Into<Role>,
    ) -> Result<bool, Error> {
        let template = self.get_template(template).await?;
        let group = self.resolve_group(group).await?;
        Ok(self.platform.add_group_to_template(template.id, &group, &role.into()).await?)
    }

    pub async fn remove_group_from_template(
        &self,
        template: &TemplateRef,
        group: &str,
        role: impl Into<Role>,
    ) -> Result<bool, Error> {
        let template = self.get_template(template).await?;
        let group = self.resolve_group(group).await?;
        Ok(self.platform.remove_group_from_template(template.id, &group, &role.into()).await?)
    }

    /// Sets whether the project creator receives the role when the
    /// template gets applied.
    pub async fn set_template_characteristic(
        &self,
        template: &TemplateRef,
        role: impl Into<Role>,
        with_project_creator: bool,
    ) -> Result<(), Error> {
        let template = self.get_template(template).await?;
        Ok(self.platform.set_template_characteristic(
            template.id,
            &role.into(),
            with_project_creator,
        ).await?)
    }
}
