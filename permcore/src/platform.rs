use async_trait::async_trait;
use crate::traits::{
    GrantBackend,
    GroupBackend,
    MembershipBackend,
    ProjectBackend,
    TemplateBackend,
    UserBackend,
};

mod connector;
pub use connector::ConnectorOption;

pub trait PlatformUrl {
    fn url(&self) -> &str;
}

/// PermPlatform - Permission Platform
///
/// This platform is used to persist grants, permission templates and the
/// identities they reference.
///
/// This trait is applicable to everything that correctly implements the
/// relevant backends that compose this trait.
#[async_trait]
pub trait PermPlatform: GrantBackend
    + GroupBackend
    + MembershipBackend
    + ProjectBackend
    + TemplateBackend
    + UserBackend

    + PlatformUrl

    + Send
    + Sync
{
    fn as_dyn(&self) -> &dyn PermPlatform;
}

pub trait DefaultPermPlatform: PermPlatform {}

impl<P: GrantBackend
    + GroupBackend
    + MembershipBackend
    + ProjectBackend
    + TemplateBackend
    + UserBackend

    + PlatformUrl

    + DefaultPermPlatform

    + Send
    + Sync
> PermPlatform for P {
    fn as_dyn(&self) -> &(dyn PermPlatform) {
        self
    }
}
