use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Runtime configuration consulted when a template is to be selected
/// for a project without being named explicitly.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Uuid of the template applied to new projects.  May name a
    /// template that no longer exists.
    pub default_template: Option<String>,
    /// Per-qualifier overrides of `default_template`.
    pub qualifier_templates: BTreeMap<String, String>,
    /// Select templates by matching the project key against their key
    /// pattern before falling back to the selectors above.
    pub key_pattern_selection: bool,
}

impl Settings {
    pub fn with_default_template(uuid: impl Into<String>) -> Self {
        Self {
            default_template: Some(uuid.into()),
            .. Default::default()
        }
    }

    pub fn qualifier_template(
        mut self,
        qualifier: impl Into<String>,
        uuid: impl Into<String>,
    ) -> Self {
        self.qualifier_templates.insert(qualifier.into(), uuid.into());
        self
    }

    pub fn key_pattern_selection(mut self, val: bool) -> Self {
        self.key_pattern_selection = val;
        self
    }

    /// The template uuid selected for projects with the qualifier.
    pub fn selector(&self, qualifier: &str) -> Option<&str> {
        self.qualifier_templates
            .get(qualifier)
            .or(self.default_template.as_ref())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn selector() {
        let settings = Settings::default();
        assert_eq!(settings.selector("TRK"), None);

        let settings = Settings::with_default_template("default")
            .qualifier_template("VW", "views");
        assert_eq!(settings.selector("TRK"), Some("default"));
        assert_eq!(settings.selector("VW"), Some("views"));

        let settings = Settings::default()
            .qualifier_template("VW", "views");
        assert_eq!(settings.selector("TRK"), None);
        assert_eq!(settings.selector("VW"), Some("views"));
    }

    #[test]
    fn deserialize() -> anyhow::Result<()> {
        let settings: Settings = serde_json::from_str(r#"{
            "default_template": "default_20130101_010203"
        }"#)?;
        assert_eq!(settings, Settings::with_default_template("default_20130101_010203"));
        assert!(!settings.key_pattern_selection);

        let settings: Settings = serde_json::from_str(r#"{
            "qualifier_templates": {"VW": "views"},
            "key_pattern_selection": true
        }"#)?;
        assert_eq!(settings, Settings::default()
            .qualifier_template("VW", "views")
            .key_pattern_selection(true));
        Ok(())
    }
}
