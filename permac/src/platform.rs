use parking_lot::RwLock;
use permcore::{
    group::DEFAULT_ORGANIZATION,
    platform::PermPlatform,
};
use std::sync::Arc;

use crate::settings::Settings;

mod applier;
mod grant;
mod identity;
mod resolve;
mod simulator;
mod template;

#[derive(Default)]
pub struct Builder {
    // platform
    platform: Option<Arc<dyn PermPlatform>>,
    // organization in which group names are looked up
    organization: Option<String>,
    settings: Settings,
}

/// The permission template engine.
///
/// Applies templates to projects, simulates what a template would
/// grant and manages the grants, templates and identities persisted in
/// the underlying platform.
pub struct Platform {
    platform: Arc<dyn PermPlatform>,
    organization: String,
    settings: RwLock<Settings>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn platform(mut self, val: impl PermPlatform + 'static) -> Self {
        self.platform = Some(Arc::new(val));
        self
    }

    pub fn arc_platform(mut self, val: Arc<dyn PermPlatform>) -> Self {
        self.platform = Some(val);
        self
    }

    pub fn organization(mut self, val: impl Into<String>) -> Self {
        self.organization = Some(val.into());
        self
    }

    pub fn settings(mut self, val: Settings) -> Self {
        self.settings = val;
        self
    }

    pub fn build(self) -> Platform {
        Platform {
            platform: self.platform
                .expect("missing required argument platform"),
            organization: self.organization
                .unwrap_or_else(|| DEFAULT_ORGANIZATION.to_string()),
            settings: RwLock::new(self.settings),
        }
    }
}

impl Platform {
    pub fn platform(&self) -> &dyn PermPlatform {
        self.platform.as_ref()
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// A copy of the current settings; a single call only ever works
    /// with one such copy.
    pub fn settings(&self) -> Settings {
        self.settings.read().clone()
    }

    pub fn set_settings(&self, settings: Settings) {
        log::info!("updating settings: {settings:?}");
        *self.settings.write() = settings;
    }

    pub fn set_default_template(&self, uuid: Option<String>) {
        log::info!("setting default template to {uuid:?}");
        self.settings.write().default_template = uuid;
    }
}
