use permcore::{
    project::Project,
    template::{
        PermissionTemplate,
        TemplateRef,
    },
    traits::GrantBackend,
};

use crate::{
    error::Error,
    platform::Platform,
};

impl Platform {
    /// Writes every grant the template defines onto the project.  When
    /// an acting user is supplied, that user receives the roles flagged
    /// for the project creator.
    ///
    /// The grants are written in a single store transaction; nothing is
    /// written should any of them fail.
    pub async fn apply_template(
        &self,
        template: &TemplateRef,
        project_id: i64,
        acting_user: Option<i64>,
    ) -> Result<(), Error> {
        let template = self.get_template(template).await?;
        let project = self.get_project(project_id).await?;
        self.apply(&template, &project, acting_user).await
    }

    /// Applies the template selected for the project by the current
    /// settings.  Returns whether a template was applied.
    pub async fn apply_default_template(
        &self,
        project_id: i64,
        acting_user: Option<i64>,
    ) -> Result<bool, Error> {
        let project = self.get_project(project_id).await?;
        match self.resolve_default_template(&project.key, &project.qualifier).await? {
            Some(template) => {
                self.apply(&template, &project, acting_user).await?;
                Ok(true)
            }
            None => {
                log::info!("no template applicable to project {:?}", project.key);
                Ok(false)
            }
        }
    }

    async fn apply(
        &self,
        template: &PermissionTemplate,
        project: &Project,
        acting_user: Option<i64>,
    ) -> Result<(), Error> {
        let grants = template.grants_for_project(project.id, acting_user)
            .into_iter()
            .collect::<Vec<_>>();
        log::info!(
            "applying template {:?} to project {:?}: {} grant(s)",
            template.uuid,
            project.key,
            grants.len(),
        );
        self.platform.insert_grants_for_project(project.id, &grants).await?;
        Ok(())
    }
}
