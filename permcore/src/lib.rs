pub mod agent;
pub mod error;
pub mod grant;
pub mod group;
pub mod platform;
pub mod principal;
pub mod project;
pub mod role;
pub mod scope;
pub mod template;
pub mod traits;
pub mod user;

pub use self::role::Role;
