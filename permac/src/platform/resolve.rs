use permcore::{
    template::PermissionTemplate,
    traits::TemplateBackend,
};
use regex::Regex;

use crate::{
    error::Error,
    platform::Platform,
    settings::Settings,
};

/// Compiles a key pattern such that it must match the whole key.
pub(crate) fn key_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{pattern})$"))
}

impl Platform {
    /// Determines the template that applies to a project that has not
    /// named one explicitly.
    ///
    /// With key pattern selection enabled, the one template whose key
    /// pattern matches the project key is selected.  Otherwise, or when
    /// no pattern matches, the selector configured for the qualifier
    /// is used.  A selector naming a template that does not exist
    /// results in no template.
    pub async fn resolve_default_template(
        &self,
        project_key: &str,
        qualifier: &str,
    ) -> Result<Option<PermissionTemplate>, Error> {
        let settings = self.settings();
        self.resolve_with(&settings, project_key, qualifier).await
    }

    async fn resolve_with(
        &self,
        settings: &Settings,
        project_key: &str,
        qualifier: &str,
    ) -> Result<Option<PermissionTemplate>, Error> {
        if settings.key_pattern_selection {
            if let Some(template) = self.match_key_pattern(project_key).await? {
                log::debug!(
                    "project key {project_key:?} matched key pattern of template {:?}",
                    template.uuid,
                );
                return Ok(Some(template));
            }
        }

        let Some(uuid) = settings.selector(qualifier) else {
            log::debug!("no default template configured for qualifier {qualifier:?}");
            return Ok(None);
        };
        let template = self.platform.get_template_by_uuid(uuid).await?;
        if template.is_none() {
            log::warn!("default template {uuid:?} does not exist; no template will apply");
        }
        Ok(template)
    }

    async fn match_key_pattern(
        &self,
        project_key: &str,
    ) -> Result<Option<PermissionTemplate>, Error> {
        let mut matched = Vec::new();
        for template in self.platform.list_templates().await?.into_iter() {
            let Some(pattern) = template.key_pattern.as_deref() else {
                continue;
            };
            if key_pattern(pattern)?.is_match(project_key) {
                matched.push(template);
            }
        }
        if matched.len() > 1 {
            return Err(Error::AmbiguousTemplate {
                key: project_key.to_string(),
                uuids: matched.into_iter()
                    .map(|template| template.uuid)
                    .collect(),
            });
        }
        Ok(matched.pop())
    }
}

#[cfg(test)]
mod test {
    use super::key_pattern;

    #[test]
    fn full_match() -> anyhow::Result<()> {
        let re = key_pattern("org\\.java\\..*")?;
        assert!(re.is_match("org.java.demo"));
        assert!(!re.is_match("com.org.java.demo"));

        let re = key_pattern("a|b")?;
        assert!(re.is_match("a"));
        assert!(!re.is_match("ab"));
        assert!(!re.is_match("xb"));

        assert!(key_pattern("(").is_err());
        Ok(())
    }
}
